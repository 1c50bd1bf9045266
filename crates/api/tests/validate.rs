use roster_api::student::{validate_email, validate_name};

#[test]
fn test_email_accepts_plain_addresses() {
    assert!(validate_email("a@b.co"));
    assert!(validate_email("rajesh.patil@gmail.com"));
}

#[test]
fn test_email_rejects_missing_tld() {
    assert!(!validate_email("a@b"));
}

#[test]
fn test_email_rejects_whitespace() {
    assert!(!validate_email("a b@c.com"));
}

#[test]
fn test_email_rejects_empty() {
    assert!(!validate_email(""));
}

#[test]
fn test_name_rejects_blank() {
    assert!(validate_name("Om Patel"));
    assert!(!validate_name(""));
    assert!(!validate_name("   "));
}
