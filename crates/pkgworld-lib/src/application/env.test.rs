use super::*;

fn env_config(vars: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_vars_keeps_choice() {
    let env = env_config(&[]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
    assert_eq!(env.apply_color_config(ColorChoice::Always), ColorChoice::Always);
}

#[test]
fn test_no_color_environment_variable() {
    let env = env_config(&[("NO_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let env = env_config(&[("NO_COLOR", "")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
}

#[test]
fn test_force_color_environment_variable() {
    let env = env_config(&[("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Always);

    let env = env_config(&[("FORCE_COLOR", "false")]);
    assert_eq!(env.apply_color_config(ColorChoice::Always), ColorChoice::Never);
}

#[test]
fn test_environment_variable_precedence() {
    let env = env_config(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
    // FORCE_COLOR wins over NO_COLOR and CLICOLOR
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Always);
}

#[test]
fn test_ci_environment_variable() {
    let env = env_config(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Always), ColorChoice::Never);
}

#[test]
fn test_clicolor_nonzero_keeps_choice() {
    let env = env_config(&[("CLICOLOR", "1")]);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
}
