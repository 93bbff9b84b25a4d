//! CLI integration tests.
//!
//! Tests cover:
//! - Config parsing (build_simulation_config, build_rsi_period)
//! - Step table rendering
//! - Every subcommand against real files on disk
//! - Exit codes for failing commands

mod common;

use common::*;
use std::fs;
use std::io::Write;
use std::process::ExitCode;
use tempfile::TempDir;
use tradelab::adapters::file_config_adapter::FileConfigAdapter;
use tradelab::cli::{self, Cli, Command};
use tradelab::domain::error::TradelabError;
use tradelab::domain::execution::ExecutionConfig;
use tradelab::domain::simulator::TradingSimulator;
use tradelab::domain::strategy::StrategyProfile;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn exit_repr(code: ExitCode) -> String {
    format!("{:?}", code)
}

const VALID_INI: &str = r#"
[simulation]
profile = simple_threshold
initial_investment = 2500.0
fee_per_trade = 5

[indicator]
rsi_period = 3
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_simulation_config_valid_full() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_simulation_config(&adapter).unwrap();

        assert_eq!(config.profile, StrategyProfile::SimpleThreshold);
        assert!((config.initial_investment - 2500.0).abs() < f64::EPSILON);
        assert!((config.fee_per_trade - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_simulation_config_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("[simulation]\n").unwrap();
        let config = cli::build_simulation_config(&adapter).unwrap();

        assert_eq!(config.profile, StrategyProfile::FixedUnitDca);
        assert!((config.initial_investment - 1000.0).abs() < f64::EPSILON);
        assert!((config.fee_per_trade - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_simulation_config_unknown_profile() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nprofile = yolo\n").unwrap();
        let err = cli::build_simulation_config(&adapter).unwrap_err();
        assert!(matches!(err, TradelabError::ConfigInvalid { key, .. } if key == "profile"));
    }

    #[test]
    fn build_rsi_period_reads_indicator_section() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        assert_eq!(cli::build_rsi_period(&adapter).unwrap(), 3);

        let empty = FileConfigAdapter::from_string("").unwrap();
        assert_eq!(cli::build_rsi_period(&empty).unwrap(), 14);
    }

    #[test]
    fn build_rsi_period_rejects_negative() {
        let adapter = FileConfigAdapter::from_string("[indicator]\nrsi_period = -2\n").unwrap();
        assert!(cli::build_rsi_period(&adapter).is_err());
    }
}

mod step_table {
    use super::*;

    #[test]
    fn renders_one_row_per_step() {
        let observations = sample_observations();
        let result = TradingSimulator::new(StrategyProfile::FixedUnitDca, ExecutionConfig::default())
            .run(1000.0, &observations);
        let table = cli::steps_table(&observations, &result.steps);

        assert_eq!(
            table.headers,
            vec!["Date", "Open", "Close", "Prediction", "Investment", "Shares", "Action", "AvgCost"]
        );
        assert_eq!(table.rows.len(), 4);
        assert_eq!(
            table.rows[0],
            vec!["2024-01-01", "50", "52", "down", "940", "1", "buy", "blocked"]
        );
        assert_eq!(
            table.rows[1],
            vec!["2024-01-02", "55", "60", "up", "990", "0", "sell", "50"]
        );
    }
}

mod commands {
    use super::*;

    fn run(command: Command) -> String {
        exit_repr(cli::run(Cli { command }))
    }

    #[test]
    fn simulate_writes_step_csv() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "obs.csv", OBSERVATIONS_CSV);
        let config = write_temp_ini("[simulation]\nprofile = trade\n");
        let output = dir.path().join("steps.csv");

        let code = run(Command::Simulate {
            config: config.path().to_path_buf(),
            input,
            profile: None,
            output: Some(output.clone()),
        });
        assert_eq!(code, exit_repr(ExitCode::SUCCESS));

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Date,Open,Close,Prediction,Investment,Shares,Action,AvgCost");
        assert_eq!(lines[4], "2024-01-04,60,61,up,973,0,sell,58");
    }

    #[test]
    fn simulate_profile_override() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "obs.csv", OBSERVATIONS_CSV);
        let config = write_temp_ini("[simulation]\nprofile = fixed_unit_dca\n");
        let output = dir.path().join("steps.csv");

        let code = run(Command::Simulate {
            config: config.path().to_path_buf(),
            input,
            profile: Some("lump_sum_rotation".into()),
            output: Some(output.clone()),
        });
        assert_eq!(code, exit_repr(ExitCode::SUCCESS));

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.lines().last().unwrap().starts_with("2024-01-04,60,61,up,1067,0,sell,"));
    }

    #[test]
    fn simulate_invalid_config_exits_2() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "obs.csv", OBSERVATIONS_CSV);
        let config = write_temp_ini("[simulation]\nfee_per_trade = -3\n");

        let code = run(Command::Simulate {
            config: config.path().to_path_buf(),
            input,
            profile: None,
            output: Some(dir.path().join("steps.csv")),
        });
        assert_eq!(code, exit_repr(ExitCode::from(2)));
    }

    #[test]
    fn simulate_missing_column_exits_3() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "obs.csv", "Date,Open,Close\n2024-01-01,1,2\n");
        let config = write_temp_ini("[simulation]\n");

        let code = run(Command::Simulate {
            config: config.path().to_path_buf(),
            input,
            profile: None,
            output: Some(dir.path().join("steps.csv")),
        });
        assert_eq!(code, exit_repr(ExitCode::from(3)));
    }

    #[test]
    fn rsi_uses_config_period() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "spx.csv", MARKET_CSV);
        let config = write_temp_ini(VALID_INI);
        let output = dir.path().join("rsi.csv");

        let code = run(Command::Rsi {
            input,
            period: None,
            config: Some(config.path().to_path_buf()),
            output: Some(output.clone()),
        });
        assert_eq!(code, exit_repr(ExitCode::SUCCESS));

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Date,Price,RSI(3)");
        assert_eq!(lines[1], "2024-01-02,2,");
        assert_eq!(lines[2], "2024-01-03,3,100");
        assert_eq!(lines[3], "2024-01-04,2,50");
    }

    #[test]
    fn rsi_on_rising_newest_first_file() {
        let dir = TempDir::new().unwrap();
        let input = write_file(
            &dir,
            "rising.csv",
            "Date,Price\n01/03/2024,3\n01/02/2024,2\n01/01/2024,1\n",
        );
        let output = dir.path().join("rsi.csv");

        let code = run(Command::Rsi {
            input,
            period: Some(14),
            config: None,
            output: Some(output.clone()),
        });
        assert_eq!(code, exit_repr(ExitCode::SUCCESS));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Date,Price,RSI(14)\n2024-01-01,1,\n2024-01-02,2,100\n2024-01-03,3,100\n"
        );
    }

    #[test]
    fn rsi_unparseable_date_exits_4() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "bad.csv", "Date,Price\nyesterday,1\n");

        let code = run(Command::Rsi {
            input,
            period: None,
            config: None,
            output: Some(dir.path().join("rsi.csv")),
        });
        assert_eq!(code, exit_repr(ExitCode::from(4)));
    }

    #[test]
    fn rsi_zero_period_exits_5() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "spx.csv", MARKET_CSV);

        let code = run(Command::Rsi {
            input,
            period: Some(0),
            config: None,
            output: Some(dir.path().join("rsi.csv")),
        });
        assert_eq!(code, exit_repr(ExitCode::from(5)));
    }

    #[test]
    fn feature_renames_price_column() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "spx.csv", MARKET_CSV);
        let output = dir.path().join("feature.csv");

        let code = run(Command::Feature {
            input,
            name: "sp500".into(),
            output: Some(output.clone()),
        });
        assert_eq!(code, exit_repr(ExitCode::SUCCESS));
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("Date,sp500\n01/05/2024,1\n"));
    }

    #[test]
    fn transpose_writes_month_end_rows() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "cpi.csv", STATSCAN_CSV);
        let output = dir.path().join("cpi_t.csv");

        let code = run(Command::Transpose {
            input,
            output: Some(output.clone()),
        });
        assert_eq!(code, exit_repr(ExitCode::SUCCESS));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Date,All-items,Food\n\
             2023-01-31,153.9,1180.2\n\
             2023-02-28,154.5,1181\n\
             2023-03-31,155.3,1190.4\n"
        );
    }

    #[test]
    fn transpose_bad_date_exits_4() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "bad.csv", "Ref,2023/01\nCPI,1\n");

        let code = run(Command::Transpose {
            input,
            output: Some(dir.path().join("out.csv")),
        });
        assert_eq!(code, exit_repr(ExitCode::from(4)));
    }

    #[test]
    fn validate_accepts_valid_config() {
        let config = write_temp_ini(VALID_INI);
        let code = run(Command::Validate {
            config: config.path().to_path_buf(),
        });
        assert_eq!(code, exit_repr(ExitCode::SUCCESS));
    }

    #[test]
    fn validate_rejects_bad_rsi_period() {
        let config = write_temp_ini("[indicator]\nrsi_period = 0\n");
        let code = run(Command::Validate {
            config: config.path().to_path_buf(),
        });
        assert_eq!(code, exit_repr(ExitCode::from(2)));
    }

    #[test]
    fn missing_input_file_exits_3() {
        let dir = TempDir::new().unwrap();
        let code = run(Command::Feature {
            input: dir.path().join("absent.csv"),
            name: "x".into(),
            output: None,
        });
        assert_eq!(code, exit_repr(ExitCode::from(3)));
    }
}
