pub const USERNAME_LENGTH: (usize, usize) = (3, 20);
pub const PASSWORD_LENGTH: (usize, usize) = (8, 50);

/// bcrypt ignores everything past this many bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Validate email format
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| "Invalid email format".to_string())?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err("Invalid email format".to_string());
    }

    if domain.split('.').any(str::is_empty) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate username length
pub fn validate_username_format(username: &str) -> Result<(), String> {
    let (min, max) = USERNAME_LENGTH;
    let len = username.chars().count();

    if len < min || len > max {
        return Err(format!("Username must be between {} and {} characters", min, max));
    }

    Ok(())
}

/// Validate password presence and length
pub fn validate_password(password: &str) -> Result<(), String> {
    let (min, max) = PASSWORD_LENGTH;

    if password.trim().is_empty() {
        return Err("Password cannot be empty".to_string());
    }

    let len = password.chars().count();
    if len < min || len > max {
        return Err(format!("Password must be between {} and {} characters", min, max));
    }

    if password.len() > PASSWORD_MAX_BYTES {
        return Err(format!("Password must not exceed {} bytes", PASSWORD_MAX_BYTES));
    }

    Ok(())
}
