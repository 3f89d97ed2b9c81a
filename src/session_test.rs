use super::*;

#[test]
fn college_id_trims_input() {
    let id = CollegeId::parse("  S123 ").unwrap();
    assert_eq!(id.as_str(), "S123");
    assert_eq!(id.to_string(), "S123");
}

#[test]
fn college_id_rejects_blank() {
    assert!(CollegeId::parse("").is_none());
    assert!(CollegeId::parse("   ").is_none());
}

#[test]
fn session_from_raw_present() {
    let session = Session::from_raw(Some("S123"));
    assert!(session.is_authenticated());
    assert_eq!(session.college_id().map(CollegeId::as_str), Some("S123"));
}

#[test]
fn session_from_raw_absent_or_blank() {
    assert!(!Session::from_raw(None).is_authenticated());
    assert!(!Session::from_raw(Some(" ")).is_authenticated());
    assert_eq!(Session::default(), Session::logged_out());
}
