//! Join declared resources with observed usage

use crate::models::{
    ContainerResources, ContainerUsage, MergedContainer, MergedPod, PodResources, UsageSample,
};

/// Annotate every declared container with its observed usage
///
/// Pod and container order follow `pods`. A container without a usage
/// sample gets `N/A` for both usage fields; usage for containers that are
/// not declared is dropped.
pub fn merge(pods: &[PodResources], usage: &UsageSample) -> Vec<MergedPod> {
    pods.iter()
        .map(|pod| MergedPod {
            pod_name: pod.pod_name.clone(),
            namespace: pod.namespace.clone(),
            containers: pod
                .containers
                .iter()
                .map(|container| {
                    let observed = usage
                        .get(&pod.pod_name, &container.container_name)
                        .cloned()
                        .unwrap_or_default();
                    merged_container(container.clone(), observed)
                })
                .collect(),
        })
        .collect()
}

fn merged_container(resources: ContainerResources, usage: ContainerUsage) -> MergedContainer {
    MergedContainer {
        resources,
        cpu_usage: usage.cpu_usage,
        memory_usage: usage.memory_usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourcePair, ResourceQuantity};

    fn container(name: &str) -> ContainerResources {
        ContainerResources {
            container_name: name.to_string(),
            requests: ResourcePair {
                cpu: "100m".into(),
                memory: "128Mi".into(),
            },
            limits: ResourcePair {
                cpu: "200m".into(),
                memory: "256Mi".into(),
            },
        }
    }

    fn pod(name: &str, containers: &[&str]) -> PodResources {
        PodResources {
            pod_name: name.to_string(),
            namespace: "default".to_string(),
            containers: containers.iter().map(|c| container(c)).collect(),
        }
    }

    fn usage(cpu: &str, memory: &str) -> ContainerUsage {
        ContainerUsage {
            cpu_usage: cpu.into(),
            memory_usage: memory.into(),
        }
    }

    #[test]
    fn test_single_pod_end_to_end() {
        let pods = vec![pod("p1", &["c1"])];
        let mut sample = UsageSample::new();
        sample.insert("p1", "c1", usage("50m", "64Mi"));

        let report = merge(&pods, &sample);

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].containers.len(), 1);
        let c = &report[0].containers[0];
        assert_eq!(c.resources, container("c1"));
        assert_eq!(c.cpu_usage.as_str(), "50m");
        assert_eq!(c.memory_usage.as_str(), "64Mi");
    }

    #[test]
    fn test_missing_usage_is_unavailable() {
        let pods = vec![pod("p1", &["c1", "c2"])];
        let mut sample = UsageSample::new();
        sample.insert("p1", "c1", usage("1m", "2Mi"));
        sample.insert("other-pod", "c2", usage("9m", "9Mi"));

        let report = merge(&pods, &sample);
        let c2 = &report[0].containers[1];
        assert_eq!(c2.cpu_usage, ResourceQuantity::Unavailable);
        assert_eq!(c2.memory_usage, ResourceQuantity::Unavailable);
    }

    #[test]
    fn test_undeclared_usage_is_dropped() {
        let pods = vec![pod("p1", &["c1"])];
        let mut sample = UsageSample::new();
        sample.insert("p1", "c1", usage("1m", "2Mi"));
        sample.insert("p1", "istio-proxy", usage("3m", "40Mi"));
        sample.insert("p2", "c1", usage("1m", "2Mi"));

        let report = merge(&pods, &sample);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].containers.len(), 1);
    }

    #[test]
    fn test_order_follows_pod_input() {
        let pods = vec![pod("zeta", &["b", "a"]), pod("alpha", &["y", "x"])];
        let mut sample = UsageSample::new();
        sample.insert("alpha", "x", usage("1m", "1Mi"));
        sample.insert("zeta", "a", usage("2m", "2Mi"));

        let report = merge(&pods, &sample);
        let order: Vec<(&str, &str)> = report
            .iter()
            .flat_map(|p| {
                p.containers
                    .iter()
                    .map(move |c| (p.pod_name.as_str(), c.resources.container_name.as_str()))
            })
            .collect();
        assert_eq!(order, vec![("zeta", "b"), ("zeta", "a"), ("alpha", "y"), ("alpha", "x")]);
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let pods = vec![pod("p1", &["c1", "c2"]), pod("p2", &["c1"])];
        let mut sample = UsageSample::new();
        sample.insert("p2", "c1", usage("7m", "70Mi"));
        sample.insert("p1", "c2", usage("3m", "30Mi"));

        let first = serde_json::to_string_pretty(&merge(&pods, &sample)).unwrap();
        let second = serde_json::to_string_pretty(&merge(&pods, &sample)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge(&[], &UsageSample::new()).is_empty());
    }
}
