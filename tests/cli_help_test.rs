#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn dashctl(config_dir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("dashctl").unwrap();
        cmd.env("DASHACTYL_CONFIG_DIR", config_dir.path())
            .env_remove("DASHACTYL_DOMAIN")
            .env_remove("DASHACTYL_API_KEY");
        cmd
    }

    #[test]
    fn test_cli_help_output() {
        let config_dir = TempDir::new().unwrap();
        dashctl(&config_dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("Commands:"))
            .stdout(predicate::str::contains("config"))
            .stdout(predicate::str::contains("ping"))
            .stdout(predicate::str::contains("user"))
            .stdout(predicate::str::contains("coupon"))
            .stdout(predicate::str::contains("store"))
            .stdout(predicate::str::contains("-V, --version"));
    }

    #[test]
    fn test_cli_subcommand_help_outputs() {
        let expectations = [
            ("config", vec!["get", "set", "path"]),
            ("user", vec!["get", "create", "delete", "coins"]),
            ("coupon", vec!["list", "get", "create", "revoke"]),
            ("store", vec!["list", "get"]),
        ];

        for (subcommand, children) in expectations {
            let config_dir = TempDir::new().unwrap();
            let assert_result = dashctl(&config_dir)
                .arg(subcommand)
                .arg("--help")
                .assert()
                .success();
            let help_output = String::from_utf8_lossy(&assert_result.get_output().stdout).to_string();
            for child in children {
                assert!(
                    help_output.contains(child),
                    "'{}' help should mention '{}'",
                    subcommand,
                    child
                );
            }
        }
    }

    #[test]
    fn test_config_set_then_get() {
        let config_dir = TempDir::new().unwrap();
        dashctl(&config_dir)
            .args(["config", "set", "domain", "https://panel.example.com"])
            .assert()
            .success();
        dashctl(&config_dir)
            .args(["config", "set", "api-key", "ptla_secret1234"])
            .assert()
            .success();

        dashctl(&config_dir)
            .args(["config", "get"])
            .assert()
            .success()
            .stdout(predicate::str::contains("https://panel.example.com/"))
            .stdout(predicate::str::contains("****1234"))
            .stdout(predicate::str::contains("ptla_secret").not());

        assert!(config_dir.path().join("config.yml").exists());
    }

    #[test]
    fn test_config_path_honors_override() {
        let config_dir = TempDir::new().unwrap();
        dashctl(&config_dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.yml"));
    }

    #[test]
    fn test_ping_without_domain_is_a_config_error() {
        let config_dir = TempDir::new().unwrap();
        dashctl(&config_dir)
            .arg("ping")
            .assert()
            .code(78)
            .stderr(predicate::str::contains("domain"));
    }

    #[test]
    fn test_invalid_domain_is_rejected() {
        let config_dir = TempDir::new().unwrap();
        dashctl(&config_dir)
            .args(["config", "set", "domain", "not a url"])
            .assert()
            .failure();
    }
}
