//! Supported frameworks, their indicator sets, and descriptive metadata

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Framework identifier as stored in `metadata.framework`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkId {
    Django,
    Flask,
    #[serde(rename = "fastapi")]
    FastApi,
    Pyramid,
    Tornado,
    Unknown,
}

impl FrameworkId {
    /// Detectable frameworks, in the order every strategy checks them
    pub const DETECTABLE: [FrameworkId; 5] = [
        FrameworkId::Django,
        FrameworkId::Flask,
        FrameworkId::FastApi,
        FrameworkId::Pyramid,
        FrameworkId::Tornado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkId::Django => "django",
            FrameworkId::Flask => "flask",
            FrameworkId::FastApi => "fastapi",
            FrameworkId::Pyramid => "pyramid",
            FrameworkId::Tornado => "tornado",
            FrameworkId::Unknown => "unknown",
        }
    }

    /// Parse an identifier, mapping anything unrecognized to `Unknown`
    pub fn from_identifier(identifier: &str) -> Self {
        identifier.parse().unwrap_or(FrameworkId::Unknown)
    }

    pub fn is_known(&self) -> bool {
        *self != FrameworkId::Unknown
    }

    pub fn info(&self) -> &'static FrameworkInfo {
        framework_info(*self)
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "django" => Ok(FrameworkId::Django),
            "flask" => Ok(FrameworkId::Flask),
            "fastapi" => Ok(FrameworkId::FastApi),
            "pyramid" => Ok(FrameworkId::Pyramid),
            "tornado" => Ok(FrameworkId::Tornado),
            "unknown" => Ok(FrameworkId::Unknown),
            other => Err(format!("unrecognized framework identifier: {}", other)),
        }
    }
}

/// Characteristic signals for one framework
#[derive(Debug)]
pub struct IndicatorSet {
    pub framework: FrameworkId,
    pub files: &'static [&'static str],
    pub directories: &'static [&'static str],
    pub imports: &'static [&'static str],
    pub patterns: Vec<Regex>,
}

fn indicator_set(
    framework: FrameworkId,
    files: &'static [&'static str],
    directories: &'static [&'static str],
    imports: &'static [&'static str],
    patterns: &[&str],
) -> IndicatorSet {
    let patterns = patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
        })
        .collect();

    IndicatorSet {
        framework,
        files,
        directories,
        imports,
        patterns,
    }
}

static INDICATOR_SETS: LazyLock<Vec<IndicatorSet>> = LazyLock::new(|| {
    vec![
        indicator_set(
            FrameworkId::Django,
            &["manage.py", "wsgi.py", "asgi.py", "settings.py"],
            &["django", "apps", "templates", "static"],
            &["django", "django.db", "django.contrib"],
            &[r"from django\.", r"import django", r"DJANGO_SETTINGS_MODULE"],
        ),
        indicator_set(
            FrameworkId::Flask,
            &["app.py", "application.py", "flask_app.py", "wsgi.py"],
            &["templates", "static", "instance"],
            &["flask", "Flask"],
            &[r"from flask import", r"app = Flask", r"@app\.route"],
        ),
        indicator_set(
            FrameworkId::FastApi,
            &["main.py", "app.py", "fastapi_app.py"],
            &["routers", "api", "models"],
            &["fastapi", "FastAPI"],
            &[
                r"from fastapi import",
                r"app = FastAPI",
                r"@app\.get",
                r"@app\.post",
            ],
        ),
        indicator_set(
            FrameworkId::Pyramid,
            &["development.ini", "production.ini"],
            &["pyramid"],
            &["pyramid", "pyramid.config"],
            &[r"from pyramid\.", r"config\.make_wsgi_app"],
        ),
        indicator_set(
            FrameworkId::Tornado,
            &["main.py", "app.py"],
            &["tornado"],
            &["tornado", "tornado.web"],
            &[r"from tornado\.", r"tornado\.web\.Application"],
        ),
    ]
});

/// All indicator sets, in detection order
pub fn indicator_sets() -> &'static [IndicatorSet] {
    &INDICATOR_SETS
}

/// Descriptive record shown next to a detected framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub website: &'static str,
    pub color: &'static str,
}

const DJANGO_INFO: FrameworkInfo = FrameworkInfo {
    name: "Django",
    description: "High-level Python web framework",
    website: "https://djangoproject.com/",
    color: "#092e20",
};

const FLASK_INFO: FrameworkInfo = FrameworkInfo {
    name: "Flask",
    description: "Lightweight WSGI web application framework",
    website: "https://flask.palletsprojects.com/",
    color: "#000000",
};

const FASTAPI_INFO: FrameworkInfo = FrameworkInfo {
    name: "FastAPI",
    description: "Modern, fast web framework for building APIs",
    website: "https://fastapi.tiangolo.com/",
    color: "#009688",
};

const PYRAMID_INFO: FrameworkInfo = FrameworkInfo {
    name: "Pyramid",
    description: "Minimalist Python web framework",
    website: "https://trypyramid.com/",
    color: "#8B4513",
};

const TORNADO_INFO: FrameworkInfo = FrameworkInfo {
    name: "Tornado",
    description: "Python web framework and networking library",
    website: "https://www.tornadoweb.org/",
    color: "#FF6B35",
};

const UNKNOWN_INFO: FrameworkInfo = FrameworkInfo {
    name: "Unknown",
    description: "No recognizable framework detected",
    website: "",
    color: "#6c757d",
};

pub fn framework_info(framework: FrameworkId) -> &'static FrameworkInfo {
    match framework {
        FrameworkId::Django => &DJANGO_INFO,
        FrameworkId::Flask => &FLASK_INFO,
        FrameworkId::FastApi => &FASTAPI_INFO,
        FrameworkId::Pyramid => &PYRAMID_INFO,
        FrameworkId::Tornado => &TORNADO_INFO,
        FrameworkId::Unknown => &UNKNOWN_INFO,
    }
}

/// Lookup by identifier string; unrecognized identifiers get the Unknown record
pub fn framework_info_for(identifier: &str) -> &'static FrameworkInfo {
    framework_info(FrameworkId::from_identifier(identifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_round_trip() {
        for id in FrameworkId::DETECTABLE {
            assert_eq!(id.as_str().parse::<FrameworkId>().unwrap(), id);
        }
        assert_eq!(FrameworkId::from_identifier("rails"), FrameworkId::Unknown);
    }

    #[test]
    fn test_serde_uses_identifier() {
        assert_eq!(
            serde_json::to_string(&FrameworkId::FastApi).unwrap(),
            "\"fastapi\""
        );
        let parsed: FrameworkId = serde_json::from_str("\"django\"").unwrap();
        assert_eq!(parsed, FrameworkId::Django);
    }

    #[test]
    fn test_indicator_sets_follow_detection_order() {
        let order: Vec<FrameworkId> = indicator_sets().iter().map(|s| s.framework).collect();
        assert_eq!(order, FrameworkId::DETECTABLE.to_vec());
    }

    #[test]
    fn test_unknown_is_not_known() {
        assert!(!FrameworkId::Unknown.is_known());
        assert!(FrameworkId::DETECTABLE.iter().all(FrameworkId::is_known));
    }

    #[test]
    fn test_every_set_names_its_imports() {
        for set in indicator_sets() {
            assert!(
                set.imports
                    .iter()
                    .any(|import| import.eq_ignore_ascii_case(set.framework.as_str())),
                "{} imports should include its own module",
                set.framework
            );
        }
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let django = &indicator_sets()[0];
        assert!(django.patterns.iter().any(|p| p.is_match("IMPORT DJANGO")));
    }

    #[test]
    fn test_framework_info_django() {
        let info = framework_info_for("django");
        assert_eq!(info.name, "Django");
        assert!(info.description.contains("web framework"));
        assert!(info.website.contains("djangoproject.com"));
    }

    #[test]
    fn test_framework_info_flask() {
        let info = FrameworkId::Flask.info();
        assert_eq!(info.name, "Flask");
        assert!(info.description.contains("WSGI"));
        assert!(info.website.contains("flask.palletsprojects.com"));
    }

    #[test]
    fn test_framework_info_unknown_fallback() {
        let info = framework_info_for("not-a-framework");
        assert_eq!(info.name, "Unknown");
        assert!(info.description.contains("No recognizable framework"));
        assert_eq!(info, framework_info_for("unknown"));
    }
}
