/// Format a phone number for display
/// Normalizes 10-digit Indian mobile numbers (with or without +91) to +91 XXXXX XXXXX
pub fn format_phone(phone: &str) -> String {
    // Extract just the digits
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!("+91 {} {}", &digits[0..5], &digits[5..10]),
        12 if digits.starts_with("91") => format!("+91 {} {}", &digits[2..7], &digits[7..12]),
        _ => phone.to_string(), // Return original if can't format
    }
}

/// Format a rupee amount with Indian digit grouping, e.g. ₹1,25,000.50
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = (paise / 100).to_string();
    let fraction = paise % 100;

    // Last three digits, then groups of two
    let grouped = if rupees.len() <= 3 {
        rupees
    } else {
        let (head, tail) = rupees.split_at(rupees.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let sign = if negative { "-" } else { "" };
    if fraction == 0 {
        format!("{}₹{}", sign, grouped)
    } else {
        format!("{}₹{}.{:02}", sign, grouped, fraction)
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    // Try to parse ISO format and convert to readable
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%d %b %Y").to_string()
    } else if let Ok(d) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        d.format("%d %b %Y").to_string()
    } else {
        date.to_string()
    }
}
