/// Shell commands that switch the session to an AWS CLI profile
pub fn profile_commands(profile: &str) -> Vec<String> {
    vec![
        format!("export AWS_PROFILE={}", profile),
        format!(
            "export AWS_REGION=$(aws configure get region --profile {})",
            profile
        ),
        "unset AWS_DEFAULT_REGION KUBE_CONFIG_PATH KUBECONFIG".to_string(),
    ]
}

/// Shell command listing the configured AWS CLI profiles
pub fn list_profiles_command() -> &'static str {
    "aws configure list-profiles"
}
