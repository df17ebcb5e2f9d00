//! Test utilities
//!
//! Generators for proptest and an in-memory container engine.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::manifest::BuildProfile;

    /// Generate an architecture name from a small pool so collisions happen
    pub fn architecture() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("arm".to_string()),
            Just("aarch64".to_string()),
            Just("mipsel".to_string()),
            Just("x86_64".to_string()),
        ]
    }

    /// Generate a subtarget name
    pub fn subtarget() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{1,8}"
    }

    /// Generate an SDK release version
    pub fn release_version() -> impl Strategy<Value = String> {
        (19u32..25, 1u32..13, 0u32..6)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor:02}.{patch}"))
    }

    /// Generate one build profile
    pub fn profile() -> impl Strategy<Value = BuildProfile> {
        (
            "[a-z][a-z0-9]{2,8}",
            subtarget(),
            architecture(),
            release_version(),
        )
            .prop_map(|(target, subtarget, architecture, version)| BuildProfile {
                target,
                subtarget,
                architecture,
                codenames: vec![],
                version,
                feeds_name: "pkg".to_string(),
            })
    }

    /// Generate a non-empty manifest profile list
    pub fn profiles() -> impl Strategy<Value = Vec<BuildProfile>> {
        proptest::collection::vec(profile(), 1..8)
    }
}

#[cfg(test)]
pub mod engine {
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use crate::error::ContainerError;
    use crate::infra::sandbox::{ContainerEngine, ContainerSpec, ImageBuildRequest, LogSink};

    /// Scripted container engine recording every call it receives
    #[derive(Debug, Default)]
    pub struct MockEngine {
        pub image_present: bool,
        pub inspect_fails: bool,
        pub build_fails: bool,
        pub create_fails: bool,
        pub start_fails: bool,
        pub logs_fail: bool,
        pub logs_hang: bool,
        pub wait_fails: bool,
        pub remove_fails: bool,
        pub exit_code: i64,
        pub log_output: Vec<u8>,
        pub calls: Mutex<Vec<String>>,
        pub created: Mutex<Vec<ContainerSpec>>,
        pub built: Mutex<Vec<ImageBuildRequest>>,
    }

    impl MockEngine {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        /// Call names in the order they arrived
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Specs passed to `create_container`
        pub fn created(&self) -> Vec<ContainerSpec> {
            self.created.lock().unwrap().clone()
        }

        pub fn built(&self) -> Vec<ImageBuildRequest> {
            self.built.lock().unwrap().clone()
        }
    }

    fn failure(call: &str) -> String {
        format!("scripted {call} failure")
    }

    #[async_trait]
    impl ContainerEngine for MockEngine {
        async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
            self.record("image_exists");
            if self.inspect_fails {
                return Err(ContainerError::InspectImage {
                    image: image.to_string(),
                    error: failure("inspect"),
                });
            }
            Ok(self.image_present)
        }

        async fn build_image(&self, request: &ImageBuildRequest) -> Result<(), ContainerError> {
            self.record("build_image");
            self.built.lock().unwrap().push(request.clone());
            if self.build_fails {
                return Err(ContainerError::BuildImage {
                    image: request.tag.clone(),
                    error: failure("build"),
                });
            }
            Ok(())
        }

        async fn create_container(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
            self.record("create");
            self.created.lock().unwrap().push(spec.clone());
            if self.create_fails {
                return Err(ContainerError::Create {
                    error: failure("create"),
                });
            }
            Ok("c0ffee".to_string())
        }

        async fn start_container(&self, id: &str) -> Result<(), ContainerError> {
            self.record("start");
            if self.start_fails {
                return Err(ContainerError::Start {
                    id: id.to_string(),
                    error: failure("start"),
                });
            }
            Ok(())
        }

        async fn follow_logs(&self, id: &str, mut sink: LogSink) -> Result<(), ContainerError> {
            self.record("logs");
            if self.logs_hang {
                std::future::pending::<()>().await;
            }
            if self.logs_fail {
                return Err(ContainerError::Logs {
                    id: id.to_string(),
                    error: failure("logs"),
                });
            }
            sink.write_all(&self.log_output)
                .map_err(|e| ContainerError::Logs {
                    id: id.to_string(),
                    error: e.to_string(),
                })
        }

        async fn wait_container(&self, id: &str) -> Result<i64, ContainerError> {
            self.record("wait");
            if self.wait_fails {
                return Err(ContainerError::Wait {
                    id: id.to_string(),
                    error: failure("wait"),
                });
            }
            Ok(self.exit_code)
        }

        async fn remove_container(&self, id: &str) -> Result<(), ContainerError> {
            self.record("remove");
            if self.remove_fails {
                return Err(ContainerError::Remove {
                    id: id.to_string(),
                    error: failure("remove"),
                });
            }
            Ok(())
        }
    }

    /// In-memory log sink whose contents stay readable after it is handed out
    #[derive(Debug, Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_release_version_generator(version in release_version()) {
            let parts: Vec<&str> = version.split('.').collect();
            prop_assert_eq!(parts.len(), 3);
            for part in parts {
                prop_assert!(part.parse::<u32>().is_ok());
            }
        }

        #[test]
        fn test_profiles_generator_non_empty(profiles in profiles()) {
            prop_assert!(!profiles.is_empty());
            prop_assert!(profiles.iter().all(|p| !p.subtarget.contains(':')));
        }
    }
}
