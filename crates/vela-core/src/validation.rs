//! # Validation Module
//!
//! Form-level input validation for the admin screens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client-side form rules)                          │
//! │  ├── Shape checks: cedula digits, phone length, e-mail format           │
//! │  └── Blocks submission locally; these errors never reach the network    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend (authoritative)                                       │
//! │  ├── Uniqueness, referential integrity, stock                           │
//! │  └── Failures come back as RemoteError with a detail message            │
//! │                                                                         │
//! │  Defense in depth: the client catches the cheap mistakes early          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult = Result<(), ValidationError>;

// =============================================================================
// Identity Fields
// =============================================================================

/// Validates a cédula (national identity number).
///
/// ## Rules
/// - Must not be empty
/// - 10 to 13 characters
/// - Digits only
pub fn validate_national_id(cedula: &str) -> ValidationResult {
    let cedula = cedula.trim();

    if cedula.is_empty() {
        return Err(ValidationError::Required { field: "cedula" });
    }
    if cedula.len() < 10 {
        return Err(ValidationError::TooShort {
            field: "cedula",
            min: 10,
        });
    }
    if cedula.len() > 13 {
        return Err(ValidationError::TooLong {
            field: "cedula",
            max: 13,
        });
    }
    if !cedula.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cedula",
            reason: "must contain only digits",
        });
    }

    Ok(())
}

/// Validates a phone number: exactly 10 digits when present.
/// Callers skip this for empty optional fields.
pub fn validate_phone(phone: &str) -> ValidationResult {
    let phone = phone.trim();

    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "telefono",
            reason: "must be exactly 10 digits",
        });
    }

    Ok(())
}

// =============================================================================
// Name & Contact Fields
// =============================================================================

/// Validates a person-name field (first names or last names).
/// Minimum 2 characters after trimming.
pub fn validate_name(field: &'static str, value: &str) -> ValidationResult {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() < 2 {
        return Err(ValidationError::TooShort { field, min: 2 });
    }

    Ok(())
}

/// Shape check for an e-mail address: something@something.something.
/// The backend does the real verification; this only catches typos early.
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();

    let valid = email
        .split_once('@')
        .map(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        })
        .unwrap_or(false);

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "correo",
            reason: "must be a valid e-mail address",
        });
    }

    Ok(())
}

/// Validates a new account password: at least 6 characters.
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: "password",
            min: 6,
        });
    }

    Ok(())
}

// =============================================================================
// Composites
// =============================================================================

/// Validates the required portion of a client form: cédula plus both name
/// fields, then the optional contact fields when filled in.
pub fn validate_client_form(client: &crate::types::Client) -> ValidationResult {
    validate_national_id(&client.national_id)?;
    validate_name("nombres", &client.first_names)?;
    validate_name("apellidos", &client.last_names)?;

    if let Some(phone) = client.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        validate_phone(phone)?;
    }
    if let Some(email) = client.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email)?;
    }

    Ok(())
}

/// Validates a new-user form before registration.
pub fn validate_new_user(user: &crate::types::NewUser) -> ValidationResult {
    validate_national_id(&user.national_id)?;
    validate_name("nombres", &user.first_names)?;
    validate_name("apellidos", &user.last_names)?;
    validate_email(&user.email)?;
    validate_password(&user.password)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Client, NewUser, Role};

    #[test]
    fn test_national_id() {
        assert!(validate_national_id("0912345678").is_ok());
        assert!(validate_national_id("0912345678901").is_ok()); // 13 digits
        assert!(validate_national_id("").is_err());
        assert!(validate_national_id("12345").is_err());
        assert!(validate_national_id("09123456789012").is_err()); // 14 digits
        assert!(validate_national_id("09123A5678").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("0991234567").is_ok());
        assert!(validate_phone("099123456").is_err());
        assert!(validate_phone("09912345678").is_err());
        assert!(validate_phone("09912345a7").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@nodot").is_err());
        assert!(validate_email("ana@.com").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("").is_err());
    }

    fn base_client() -> Client {
        Client {
            id: None,
            national_id: "0912345678".to_string(),
            first_names: "Ana".to_string(),
            last_names: "Suarez".to_string(),
            phone: None,
            email: None,
            address: None,
            city: None,
        }
    }

    #[test]
    fn test_client_form_optional_fields() {
        // Empty optionals are fine
        assert!(validate_client_form(&base_client()).is_ok());

        // Filled-in optionals are checked
        let mut client = base_client();
        client.phone = Some("123".to_string());
        assert!(validate_client_form(&client).is_err());

        let mut client = base_client();
        client.email = Some("ana@example.com".to_string());
        assert!(validate_client_form(&client).is_ok());
    }

    #[test]
    fn test_new_user_form() {
        let user = NewUser {
            national_id: "0912345678".to_string(),
            first_names: "Ana".to_string(),
            last_names: "Suarez".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Seller,
            password: "secret1".to_string(),
        };
        assert!(validate_new_user(&user).is_ok());

        let mut short_pw = user.clone();
        short_pw.password = "123".to_string();
        assert!(validate_new_user(&short_pw).is_err());
    }
}
