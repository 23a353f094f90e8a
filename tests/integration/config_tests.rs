use dupescan::cli::OutputFormat;
use dupescan::config::Config;
use figment::Jail;
use std::path::Path;

#[test]
fn test_toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dupescan.toml",
            r#"
            threads = 4
            output = "json"
            "#,
        )?;

        let config: Config = Config::figment(Some(Path::new("dupescan.toml"))).extract()?;
        assert_eq!(config.threads, 4);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.buffer_size, 10 * 1024);
        assert!(config.progress);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("dupescan.toml", "threads = 4\nprogress = true")?;
        jail.set_env("DUPESCAN_THREADS", "6");
        jail.set_env("DUPESCAN_PROGRESS", "false");

        let config: Config = Config::figment(Some(Path::new("dupescan.toml"))).extract()?;
        assert_eq!(config.threads, 6);
        assert!(!config.progress);
        Ok(())
    });
}

#[test]
fn test_load_falls_back_on_invalid_values() {
    Jail::expect_with(|jail| {
        jail.create_file("bad.toml", "threads = \"many\"")?;

        let config = Config::load(Some(Path::new("bad.toml")));
        assert_eq!(config, Config::default());
        Ok(())
    });
}

#[test]
fn test_load_sanitizes_zero_threads() {
    Jail::expect_with(|jail| {
        jail.create_file("zero.toml", "threads = 0\nbuffer_size = 0")?;

        let config = Config::load(Some(Path::new("zero.toml")));
        assert_eq!(config.threads, 10);
        assert_eq!(config.buffer_size, 10 * 1024);
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config = Config::load(Some(Path::new("absent.toml")));
        assert_eq!(config, Config::default());
        Ok(())
    });
}

#[test]
fn test_save_round_trips_through_figment() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("nested").join("config.toml");
        let config = Config {
            threads: 3,
            buffer_size: 4096,
            output: OutputFormat::Json,
            progress: false,
        };
        config.save(&path).unwrap();

        let loaded: Config = Config::figment(Some(&path)).extract()?;
        assert_eq!(loaded, config);
        Ok(())
    });
}
