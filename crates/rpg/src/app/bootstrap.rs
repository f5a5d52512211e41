use std::path::PathBuf;

use runtime::{LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay;

const PROJECT_FILE_ENV_VAR: &str = "GRIDRPG_PROJECT_FILE";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Grid RPG Startup ===");

    let scene = gameplay::build_scene(project_file_from_env().as_deref());

    AppWiring {
        config: LoopConfig::default(),
        scene,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn project_file_from_env() -> Option<PathBuf> {
    std::env::var_os(PROJECT_FILE_ENV_VAR).map(PathBuf::from)
}
