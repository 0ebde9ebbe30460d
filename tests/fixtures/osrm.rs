//! OSRM container for the road-network tests.
//!
//! Expects a prepared MLD dataset (osrm-extract/partition/customize already
//! run) in `OSRM_DATA_DIR`, named by `OSRM_DATASET`
//! (default `chile-latest.osrm`).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use route_sequencer::osrm::{OsrmClient, OsrmConfig};

pub fn osrm_container() -> Result<(Container<GenericImage>, OsrmClient), TestcontainersError> {
    let data_dir =
        PathBuf::from(env::var("OSRM_DATA_DIR").unwrap_or_else(|_| "osrm-data".to_string()));
    let dataset = env::var("OSRM_DATASET").unwrap_or_else(|_| "chile-latest.osrm".to_string());
    let data_dir = if data_dir.is_absolute() {
        data_dir
    } else {
        env::current_dir()
            .map_err(|err| TestcontainersError::other(format!("no working directory: {err}")))?
            .join(data_dir)
    };

    let partition = data_dir.join(format!("{dataset}.partition"));
    if !partition.exists() {
        return Err(TestcontainersError::other(format!(
            "OSRM dataset not prepared: {} is missing",
            partition.display()
        )));
    }

    let image = GenericImage::new("osrm/osrm-backend", "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(data_dir.to_string_lossy().to_string(), "/data"))
        .with_cmd(vec![
            "osrm-routed".to_string(),
            "--algorithm".to_string(),
            "mld".to_string(),
            format!("/data/{dataset}"),
        ])
        .with_container_name(format!("route-sequencer-osrm-{}", dataset.replace('.', "-")))
        .with_startup_timeout(Duration::from_secs(60))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(5000.tcp())?;

    let osrm = OsrmClient::new(OsrmConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        profile: "driving".to_string(),
        timeout_secs: 30,
    })
    .map_err(|err| TestcontainersError::other(format!("OSRM client failed: {err}")))?;

    Ok((container, osrm))
}
