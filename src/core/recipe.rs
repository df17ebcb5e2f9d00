//! Build recipe
//!
//! The fixed sequence of SDK commands run inside the builder container,
//! kept as an ordered list of steps and rendered into a single fail-fast
//! shell script only at the edge.

use crate::config::defaults;

/// One step of the in-container build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Register the staged feed as a `src-link` source
    RegisterFeed { feed_name: String },
    /// Append the SDK's default feeds, dropping unneeded categories
    MergeDefaultFeeds { pruned: Vec<String> },
    /// Update all feeds and install the staged package
    InstallPackage { package: String },
    /// Replace `.config` with an allow-list enabling only the package
    ResetConfig { package: String },
    /// Run one `make` target
    Make { target: String },
    /// Copy produced `.ipk` files into the output mount
    CollectArtifacts { package: String },
}

impl BuildStep {
    /// Short label echoed before the step runs
    pub fn label(&self) -> String {
        match self {
            BuildStep::RegisterFeed { feed_name } => format!("register feed '{feed_name}'"),
            BuildStep::MergeDefaultFeeds { .. } => "merge default feeds".to_string(),
            BuildStep::InstallPackage { package } => format!("install {package} from feeds"),
            BuildStep::ResetConfig { .. } => "reset .config".to_string(),
            BuildStep::Make { target } => format!("make {target}"),
            BuildStep::CollectArtifacts { .. } => {
                format!("collect packages into {}", defaults::OUTPUT_MOUNT)
            }
        }
    }

    /// Shell lines for this step; `make_opts` is appended to every `make`
    pub fn commands(&self, make_opts: &str) -> Vec<String> {
        match self {
            BuildStep::RegisterFeed { feed_name } => vec![format!(
                "echo \"src-link {feed_name} {}\" > feeds.conf",
                defaults::FEED_MOUNT
            )],
            BuildStep::MergeDefaultFeeds { pruned } => {
                let mut lines = vec!["cat feeds.conf.default >> feeds.conf".to_string()];
                lines.extend(pruned.iter().map(|name| format!("sed -i '/{name}/d' feeds.conf")));
                lines
            }
            BuildStep::InstallPackage { package } => vec![
                "./scripts/feeds update -a".to_string(),
                format!("./scripts/feeds install {package}"),
            ],
            BuildStep::ResetConfig { package } => vec![
                "rm -f .config".to_string(),
                "touch .config".to_string(),
                "echo \"# CONFIG_ALL_NONSHARED is not set\" >> .config".to_string(),
                "echo \"# CONFIG_ALL_KMODS is not set\" >> .config".to_string(),
                "echo \"# CONFIG_ALL is not set\" >> .config".to_string(),
                format!("echo \"CONFIG_PACKAGE_{package}=y\" >> .config"),
            ],
            BuildStep::Make { target } => vec![format!("make{make_opts} {target}")],
            BuildStep::CollectArtifacts { package } => vec![
                format!("mkdir -p {}", defaults::OUTPUT_MOUNT),
                format!(
                    "find bin/packages -type f -name '{package}_*.ipk' -exec cp {{}} {}/ \\;",
                    defaults::OUTPUT_MOUNT
                ),
            ],
        }
    }
}

/// Ordered build steps for one package
#[derive(Debug, Clone)]
pub struct BuildRecipe {
    steps: Vec<BuildStep>,
    verbose: bool,
}

impl BuildRecipe {
    /// Standard recipe: register, merge, install, configure, build, collect, clean
    pub fn new(package: &str, feed_name: &str, verbose: bool) -> Self {
        let make = |target: String| BuildStep::Make { target };
        let steps = vec![
            BuildStep::RegisterFeed {
                feed_name: feed_name.to_string(),
            },
            BuildStep::MergeDefaultFeeds {
                pruned: defaults::PRUNED_FEEDS
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
            },
            BuildStep::InstallPackage {
                package: package.to_string(),
            },
            BuildStep::ResetConfig {
                package: package.to_string(),
            },
            make("defconfig".to_string()),
            make(format!("package/{package}/download")),
            make(format!("package/{package}/prepare")),
            make(format!("package/{package}/compile")),
            BuildStep::CollectArtifacts {
                package: package.to_string(),
            },
            make(format!("package/{package}/clean")),
        ];
        Self { steps, verbose }
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    /// Extra `make` options: single job with full output in verbose mode
    pub fn make_opts(&self) -> &'static str {
        if self.verbose {
            " -j1 V=s"
        } else {
            ""
        }
    }

    /// Render as one `set -e` script run from the SDK mount
    pub fn render(&self) -> String {
        let make_opts = self.make_opts();
        let mut lines = vec![
            "set -e".to_string(),
            format!("cd {}", defaults::SDK_MOUNT),
        ];
        for step in &self.steps {
            lines.push(format!("echo \"==> {}\"", step.label().replace('"', "'")));
            lines.extend(step.commands(make_opts));
        }
        lines.join("\n")
    }

    /// Container entrypoint running the rendered script
    pub fn entrypoint(&self) -> Vec<String> {
        vec!["/bin/bash".to_string(), "-c".to_string(), self.render()]
    }
}
