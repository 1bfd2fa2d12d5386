fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|part| !part.is_empty())
}

/// Join street and house number into a single display line.
pub fn format_address(street: Option<&str>, house_number: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(street) = present(street) {
        parts.push(street.to_string());
    }

    if let Some(number) = present(house_number) {
        match parts.last_mut() {
            Some(last) => {
                last.push(' ');
                last.push_str(number);
            }
            None => parts.push(number.to_string()),
        }
    }

    parts.join(" ")
}
