use axum::Router;

use idiom_service::config::{Config, DatasetConfig};
use idiom_service::idiom::{Idiom, IdiomCatalog};
use idiom_service::routes::build_router;
use idiom_service::state::AppState;

use super::fixtures::sample_idioms;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
}

// 直接构造 Config，避免 set_var 造成多线程测试环境变量竞态
pub fn test_config() -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 0,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        cors_origin: "*".to_string(),
        request_timeout_secs: 15,
        dataset: DatasetConfig {
            source: "./idiom.json".to_string(),
            fetch_timeout_secs: 5,
            max_bytes: 1024 * 1024,
        },
    }
}

pub fn spawn_with_records(records: Vec<Idiom>) -> TestApp {
    let config = test_config();
    let state = AppState::new(IdiomCatalog::from_records(records), &config);
    let app = build_router(state.clone());

    TestApp { app, state, config }
}

pub fn spawn_test_app() -> TestApp {
    spawn_with_records(sample_idioms())
}
