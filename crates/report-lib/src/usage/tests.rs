//! Tests for the usage strategies
//!
//! The kubectl strategy is exercised against small shell scripts standing
//! in for the real binary, so no cluster is needed.

#[cfg(test)]
mod parse_tests {
    use crate::models::ResourceQuantity;
    use crate::usage::parse_top_output;

    #[test]
    fn test_well_formed_row() {
        let usage = parse_top_output("pod-a container-a 10m 20Mi\n");
        let entry = usage.get("pod-a", "container-a").unwrap();
        assert_eq!(entry.cpu_usage.as_str(), "10m");
        assert_eq!(entry.memory_usage.as_str(), "20Mi");
    }

    #[test]
    fn test_short_rows_are_excluded() {
        let output = "pod-a container-a 10m\npod-b\n\npod-c app 1m 2Mi\n";
        let usage = parse_top_output(output);
        assert!(usage.pod("pod-a").is_none());
        assert!(usage.pod("pod-b").is_none());
        assert_eq!(usage.len(), 1);
        assert!(usage.get("pod-c", "app").is_some());
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let usage = parse_top_output("pod-a app 3m 4Mi extra columns\n");
        let entry = usage.get("pod-a", "app").unwrap();
        assert_eq!(entry.cpu_usage, ResourceQuantity::Value("3m".to_string()));
        assert_eq!(entry.memory_usage, ResourceQuantity::Value("4Mi".to_string()));
    }

    #[test]
    fn test_header_row_is_skipped() {
        let output = "POD      NAME   CPU(cores)   MEMORY(bytes)\nweb-0    nginx  1m           5Mi\n";
        let usage = parse_top_output(output);
        assert!(usage.pod("POD").is_none());
        assert_eq!(usage.container_count(), 1);
    }

    #[test]
    fn test_multiple_containers_per_pod() {
        let output = "web-0 nginx 1m 5Mi\nweb-0 envoy 2m 30Mi\nweb-1 nginx 1m 6Mi\n";
        let usage = parse_top_output(output);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage.pod("web-0").unwrap().len(), 2);
        assert_eq!(usage.get("web-0", "envoy").unwrap().memory_usage.as_str(), "30Mi");
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_top_output("").is_empty());
    }
}

#[cfg(test)]
mod kubectl_tests {
    use crate::config::ReportConfig;
    use crate::error::ReportError;
    use crate::usage::{KubectlTopSource, UsageSource};
    use std::path::PathBuf;

    #[test]
    fn test_args_pin_context_and_kubeconfig() {
        let mut config = ReportConfig::new("prod", "payments");
        config.kubeconfig = Some(PathBuf::from("/tmp/kubeconfig"));
        let args = KubectlTopSource::from_config(&config).args("payments");

        assert_eq!(
            args,
            vec![
                "top",
                "pods",
                "-n",
                "payments",
                "--containers",
                "--no-headers",
                "--context",
                "prod",
                "--kubeconfig",
                "/tmp/kubeconfig",
            ]
        );
    }

    #[test]
    fn test_args_without_context() {
        let args = KubectlTopSource::new("kubectl").args("default");
        assert!(!args.contains(&"--context".to_string()));
        assert!(!args.contains(&"--kubeconfig".to_string()));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let source = KubectlTopSource::new("/nonexistent/path/to/kubectl");
        let err = source.fetch_usage("default").await.unwrap_err();
        assert!(matches!(err, ReportError::CommandSpawn { .. }));
    }

    #[cfg(unix)]
    fn write_script(dir: &tempfile::TempDir, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-kubectl");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_parses_command_output() {
        let dir = tempfile::tempdir().unwrap();
        let program = write_script(
            &dir,
            "printf 'api-0 app 12m 40Mi\\napi-0 proxy 1m\\napi-1 app 8m 38Mi\\n'",
        );

        let usage = KubectlTopSource::new(program)
            .fetch_usage("default")
            .await
            .unwrap();

        assert_eq!(usage.container_count(), 2);
        assert_eq!(usage.get("api-0", "app").unwrap().cpu_usage.as_str(), "12m");
        assert!(usage.get("api-0", "proxy").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_command_failure() {
        let dir = tempfile::tempdir().unwrap();
        let program = write_script(&dir, "echo 'error: Metrics API not available' >&2\nexit 1");

        let err = KubectlTopSource::new(program)
            .fetch_usage("default")
            .await
            .unwrap_err();

        match err {
            ReportError::CommandFailed { stderr, .. } => {
                assert_eq!(stderr, "error: Metrics API not available");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[cfg(test)]
mod metrics_api_tests {
    use crate::usage::{usage_from_metrics, PodMetrics};

    const POD_METRICS_LIST: &str = r#"{
        "kind": "PodMetricsList",
        "apiVersion": "metrics.k8s.io/v1beta1",
        "items": [
            {
                "metadata": {"name": "web-0", "namespace": "default"},
                "timestamp": "2024-01-02T03:04:05Z",
                "window": "15s",
                "containers": [
                    {"name": "nginx", "usage": {"cpu": "1234567n", "memory": "5120Ki"}},
                    {"name": "envoy", "usage": {"memory": "30Mi"}}
                ]
            },
            {
                "metadata": {"name": "web-1", "namespace": "default"},
                "containers": []
            }
        ]
    }"#;

    fn items() -> Vec<PodMetrics> {
        let value: serde_json::Value = serde_json::from_str(POD_METRICS_LIST).unwrap();
        serde_json::from_value(value["items"].clone()).unwrap()
    }

    #[test]
    fn test_usage_from_metrics_keeps_raw_quantities() {
        let usage = usage_from_metrics(&items());
        let nginx = usage.get("web-0", "nginx").unwrap();
        assert_eq!(nginx.cpu_usage.as_str(), "1234567n");
        assert_eq!(nginx.memory_usage.as_str(), "5120Ki");
    }

    #[test]
    fn test_missing_usage_dimension_is_unavailable() {
        let usage = usage_from_metrics(&items());
        let envoy = usage.get("web-0", "envoy").unwrap();
        assert_eq!(envoy.cpu_usage.as_str(), "N/A");
        assert_eq!(envoy.memory_usage.as_str(), "30Mi");
    }

    #[test]
    fn test_pod_without_containers_adds_nothing() {
        let usage = usage_from_metrics(&items());
        assert!(usage.pod("web-1").is_none());
        assert_eq!(usage.container_count(), 2);
    }

    #[test]
    fn test_metrics_resource_path() {
        use kube::Resource;
        assert_eq!(
            PodMetrics::url_path(&(), Some("default")),
            "/apis/metrics.k8s.io/v1beta1/namespaces/default/pods"
        );
    }
}
