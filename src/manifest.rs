//! The `package.json` of the generated project.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::options::{Options, PostCss};

/// Runtime dependencies every project gets.
const BASE_DEPENDENCIES: [(&str, &str); 5] = [
    ("cookie-parser", "^1.4.6"),
    ("debug", "^4.3.4"),
    ("dotenv", "^16.4.1"),
    ("express", "^4.18.2"),
    ("morgan", "^1.10.0"),
];

/// Added alongside any view engine for 404/500 handling.
const HTTP_ERRORS: (&str, &str) = ("http-errors", "^2.0.0");

const POSTCSS_DEV_DEPENDENCIES: [(&str, &str); 3] = [
    ("autoprefixer", "^10.4.17"),
    ("postcss", "^8.4.33"),
    ("postcss-cli", "^11.0.0"),
];

const TAILWIND: (&str, &str) = ("tailwindcss", "^3.4.1");

const POSTCSS_BUILD: &str =
    "postcss --env=production ./public/css/style.css -o ./public/css/dist/style.css";
const POSTCSS_WATCH: &str = "postcss ./public/css/style.css -o ./public/css/dist/style.css -w";

/// Package descriptor. Dependency tables are `BTreeMap`s so keys always
/// serialize in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub name: String,
    pub version: &'static str,
    pub private: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<&'static str>,
    pub scripts: IndexMap<&'static str, String>,
    pub dependencies: BTreeMap<&'static str, &'static str>,
    #[serde(rename = "devDependencies", skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<&'static str, &'static str>,
}

impl Manifest {
    /// Builds the manifest for `options`.
    pub fn new(options: &Options) -> Self {
        let mut scripts = IndexMap::new();
        scripts.insert("start", format!("node ./bin/{}", options.script_file("www")));

        let mut dependencies: BTreeMap<_, _> = BASE_DEPENDENCIES.into_iter().collect();
        if let Some(view) = options.view() {
            dependencies.extend([HTTP_ERRORS, view.package()]);
        }

        let mut dev_dependencies = BTreeMap::new();
        if let Some(postcss) = options.postcss() {
            scripts.insert("postcss:build", POSTCSS_BUILD.to_string());
            scripts.insert("postcss:watch", POSTCSS_WATCH.to_string());
            dev_dependencies.extend(POSTCSS_DEV_DEPENDENCIES);
            if postcss == PostCss::Tailwind {
                dev_dependencies.insert(TAILWIND.0, TAILWIND.1);
            }
        }

        Self {
            name: options.name().to_string(),
            version: "0.0.0",
            private: true,
            module_type: options.module().is_esm().then_some("module"),
            scripts,
            dependencies,
            dev_dependencies,
        }
    }

    /// Pretty-printed JSON with two-space indentation and a final newline.
    ///
    /// # Errors
    /// * `Error::Manifest` if serialization fails
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
