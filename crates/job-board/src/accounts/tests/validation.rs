use crate::accounts::{CompanySignUp, SignInRequest, ValidationError};

fn company_form(password: &str, confirmation: &str) -> CompanySignUp {
    CompanySignUp {
        name: "Acme".to_string(),
        email: "hr@acme.test".to_string(),
        password: password.to_string(),
        confirm_password: confirmation.to_string(),
        website: String::new(),
        phone: String::new(),
        industry: String::new(),
        linkedin: String::new(),
    }
}

#[test]
fn sign_in_requires_both_fields() {
    let request = SignInRequest {
        email: "   ".to_string(),
        password: "secret".to_string(),
    };
    assert_eq!(request.validate(), Err(ValidationError::MissingCredentials));
    assert_eq!(
        ValidationError::MissingCredentials.to_string(),
        "Email and Password cannot be empty"
    );
}

#[test]
fn sign_up_checks_required_fields_first() {
    let mut form = company_form("abc", "xyz");
    form.name = String::new();
    assert_eq!(form.validate(), Err(ValidationError::MissingRequiredFields));
}

#[test]
fn sign_up_checks_confirmation_before_length() {
    assert_eq!(
        company_form("abc", "xyz").validate(),
        Err(ValidationError::PasswordMismatch)
    );
    assert_eq!(
        company_form("abc", "abc").validate(),
        Err(ValidationError::PasswordTooShort)
    );
    assert_eq!(company_form("abcdef", "abcdef").validate(), Ok(()));
}
