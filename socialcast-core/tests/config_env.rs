use serial_test::serial;
use socialcast_core::config::{
    ConfigError, GeneratorConfig, XCredentials, API_KEY_VAR, X_CREDENTIAL_VARS,
};

fn clear_x_vars() {
    for var in X_CREDENTIAL_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn x_credentials_load_when_all_vars_are_set() {
    clear_x_vars();
    std::env::set_var("X_API_KEY", "ck");
    std::env::set_var("X_API_SECRET", "cs");
    std::env::set_var("X_ACCESS_TOKEN", "at");
    std::env::set_var("X_ACCESS_SECRET", "as");

    let credentials = XCredentials::from_env().expect("All credentials are present");
    assert_eq!(credentials.api_key, "ck");
    assert_eq!(credentials.api_secret, "cs");
    assert_eq!(credentials.access_token, "at");
    assert_eq!(credentials.access_secret, "as");
    clear_x_vars();
}

#[test]
#[serial]
fn missing_x_credentials_are_all_listed() {
    clear_x_vars();
    std::env::set_var("X_API_KEY", "ck");
    std::env::set_var("X_ACCESS_TOKEN", "at");

    let error = XCredentials::from_env().expect_err("Two credentials are missing");
    match error {
        ConfigError::MissingCredentials(missing) => {
            assert_eq!(missing, vec!["X_API_SECRET", "X_ACCESS_SECRET"]);
        }
        other => panic!("Expected MissingCredentials, got {other:?}"),
    }
    let message = format!("{}", XCredentials::from_env().unwrap_err());
    assert!(
        message.contains("X_API_SECRET") && message.contains("X_ACCESS_SECRET"),
        "The error must name every missing variable: {message}"
    );
    clear_x_vars();
}

#[test]
#[serial]
fn generator_config_requires_the_api_key() {
    std::env::remove_var(API_KEY_VAR);
    assert!(matches!(
        GeneratorConfig::from_env(),
        Err(ConfigError::MissingEnv(API_KEY_VAR))
    ));

    std::env::set_var(API_KEY_VAR, "sk-test");
    let config = GeneratorConfig::from_env().expect("Key is set");
    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.max_tokens, 400);
    assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    std::env::remove_var(API_KEY_VAR);
}
