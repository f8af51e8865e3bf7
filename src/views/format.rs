/// Group the integer part in threes and keep at most three fraction digits,
/// dropping trailing zeros: `1234567.5` becomes `"1,234,567.5"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scaled = (value.abs() * 1000.0).round() as u128;
    let whole = scaled / 1000;
    let frac = scaled % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac > 0 {
        let frac = format!("{:03}", frac);
        grouped.push('.');
        grouped.push_str(frac.trim_end_matches('0'));
    }

    if value < 0.0 && scaled > 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_rupees(amount: f64) -> String {
    format!("₹{}", format_number(amount))
}

pub fn format_percent(rate: f64) -> String {
    format!("{}%", rate)
}
