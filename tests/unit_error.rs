use recur::error::{exit_codes, Error};

#[test]
fn every_surfaced_error_maps_to_init_failed() {
    let errors = [
        Error::InvalidConfig("bad".to_string()),
        Error::MissingToken,
        Error::Auth("rejected".to_string()),
        Error::UnknownLabel("auto".to_string()),
        Error::UnknownProject("Chores".to_string()),
        Error::Network("down".to_string()),
        Error::Commit("rejected".to_string()),
    ];
    for err in errors {
        assert_eq!(err.exit_code(), exit_codes::INIT_FAILED);
    }
}

#[test]
fn messages_name_the_offending_reference() {
    let err = Error::UnknownLabel("autoo".to_string());
    assert!(err.to_string().contains("autoo"));

    let err = Error::UnknownProject("Choores".to_string());
    assert!(err.to_string().contains("Choores"));
}

#[test]
fn missing_token_message_points_at_both_sources() {
    let message = Error::MissingToken.to_string();
    assert!(message.contains("--token"));
    assert!(message.contains("TODOIST_TOKEN"));
}
