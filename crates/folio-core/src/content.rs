//! Portfolio content model
//!
//! All page sections (navigation, services, technologies, experience,
//! testimonials, projects) are declarative data. The built-in data set ships
//! with the binary; a JSON content file with the same shape can replace it at
//! startup, so the page can be re-skinned without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse content: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Duplicate navigation id: {0}")]
    DuplicateNavId(String),
    #[error("Empty field: {0}")]
    EmptyField(&'static str),
    #[error("Invalid source link for project {project}: {link}")]
    InvalidSourceLink { project: String, link: String },
}

/// An in-page navigation target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    /// Anchor id of the section (e.g., "about")
    pub id: String,
    /// Display title
    pub title: String,
}

/// A service/role card shown in the About section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
}

/// A technology badge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
}

/// A work experience entry on the timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    /// Human-readable date range (e.g., "Feb 2025 - April 2025")
    pub date: String,
    /// Bullet points describing the role
    pub points: Vec<String>,
}

/// A testimonial quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    pub designation: String,
    pub company: String,
}

/// A tag chip on a project card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTag {
    pub name: String,
}

/// A project showcase card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<ProjectTag>,
    /// Link to the project repository
    pub source_code_link: String,
}

/// The complete page content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub nav_links: Vec<NavLink>,
    pub services: Vec<Service>,
    pub technologies: Vec<Technology>,
    pub experiences: Vec<Experience>,
    pub testimonials: Vec<Testimonial>,
    pub projects: Vec<Project>,
}

impl Content {
    /// Parse content from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let content: Content = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// Load content from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from a file if it exists, otherwise use the built-in data set
    pub fn load_or_built_in(path: &Path) -> Result<Self, ContentError> {
        if path.exists() {
            info!("Loading content from {}", path.display());
            Self::from_file(path)
        } else {
            info!("No content file at {}, using built-in data", path.display());
            Ok(Self::built_in())
        }
    }

    /// Check structural invariants: unique nav ids, no empty display fields,
    /// http(s) project links
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = std::collections::HashSet::new();
        for link in &self.nav_links {
            if link.id.is_empty() {
                return Err(ContentError::EmptyField("nav_links.id"));
            }
            if !seen.insert(link.id.as_str()) {
                return Err(ContentError::DuplicateNavId(link.id.clone()));
            }
        }
        for exp in &self.experiences {
            if exp.title.is_empty() {
                return Err(ContentError::EmptyField("experiences.title"));
            }
            if exp.company.is_empty() {
                return Err(ContentError::EmptyField("experiences.company"));
            }
        }
        for project in &self.projects {
            if project.name.is_empty() {
                return Err(ContentError::EmptyField("projects.name"));
            }
            let link = &project.source_code_link;
            if !(link.starts_with("http://") || link.starts_with("https://")) {
                return Err(ContentError::InvalidSourceLink {
                    project: project.name.clone(),
                    link: link.clone(),
                });
            }
        }
        Ok(())
    }

    /// The data set compiled into the binary
    pub fn built_in() -> Self {
        Self {
            nav_links: vec![
                NavLink { id: "about".into(), title: "About".into() },
                NavLink { id: "work".into(), title: "Work".into() },
                NavLink { id: "contact".into(), title: "Contact".into() },
            ],
            services: vec![
                Service { title: "Web Developer".into() },
                Service { title: "React Developer".into() },
                Service { title: "Backend Developer".into() },
                Service { title: "Data Analyst".into() },
            ],
            technologies: vec![
                Technology { name: "HTML 5".into() },
                Technology { name: "CSS 3".into() },
                Technology { name: "JavaScript".into() },
                Technology { name: "TypeScript".into() },
                Technology { name: "React JS".into() },
                Technology { name: "Tailwind CSS".into() },
                Technology { name: "Node JS".into() },
                Technology { name: "MongoDB".into() },
                Technology { name: "Three JS".into() },
                Technology { name: "git".into() },
                Technology { name: "docker".into() },
            ],
            experiences: vec![Experience {
                title: "Web Developer Intern".into(),
                company: "Right-Click Software Solutions".into(),
                date: "Feb 2025 - April 2025".into(),
                points: vec![
                    "Developed and maintained dynamic web applications using the MERN \
                     stack (MongoDB, Express.js, React.js, Node.js)."
                        .into(),
                    "Built and integrated RESTful APIs for backend services, ensuring \
                     seamless communication with frontend components."
                        .into(),
                    "Implemented user authentication and authorization features using \
                     JWT and bcrypt."
                        .into(),
                    "Collaborated in an Agile team environment, participating in code \
                     reviews, daily stand-ups, and sprint planning."
                        .into(),
                ],
            }],
            testimonials: vec![
                Testimonial {
                    quote: "I thought it was impossible to make a website as beautiful \
                            as our product, but Rick proved me wrong."
                        .into(),
                    name: "Sara Lee".into(),
                    designation: "CFO".into(),
                    company: "Acme Co".into(),
                },
                Testimonial {
                    quote: "I've never met a web developer who truly cares about their \
                            clients' success like Rick does."
                        .into(),
                    name: "Chris Brown".into(),
                    designation: "COO".into(),
                    company: "DEF Corp".into(),
                },
                Testimonial {
                    quote: "After Rick optimized our website, our traffic increased by \
                            50%. We can't thank them enough!"
                        .into(),
                    name: "Lisa Wang".into(),
                    designation: "CTO".into(),
                    company: "456 Enterprises".into(),
                },
            ],
            projects: vec![
                Project {
                    name: "AgriVision ML Framework".into(),
                    description: "Built the FarmSmart Platform, a full-stack web \
                                  application enabling farmers to efficiently compare \
                                  and purchase agrochemicals while supporting vendors \
                                  in managing product listings."
                        .into(),
                    tags: vec![
                        ProjectTag { name: "react".into() },
                        ProjectTag { name: "mongodb".into() },
                        ProjectTag { name: "restapi".into() },
                        ProjectTag { name: "tailwind".into() },
                        ProjectTag { name: "nodejs".into() },
                        ProjectTag { name: "expressjs".into() },
                    ],
                    source_code_link: "https://github.com/UMESH09103/farmer-compare".into(),
                },
                Project {
                    name: "DJ Booking & Management Platform".into(),
                    description: "Developed the platform's backend architecture with \
                                  JWT-based authentication, role-based access control, \
                                  and secure MongoDB + bcrypt integration for user and \
                                  admin management."
                        .into(),
                    tags: vec![
                        ProjectTag { name: "nodejs".into() },
                        ProjectTag { name: "expressjs".into() },
                        ProjectTag { name: "mongodb".into() },
                        ProjectTag { name: "restapi".into() },
                        ProjectTag { name: "tailwind".into() },
                    ],
                    source_code_link: "https://github.com/UMESH09103/booking-app".into(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_content_validates() {
        let content = Content::built_in();
        content.validate().unwrap();
        assert_eq!(content.nav_links.len(), 3);
        assert_eq!(content.services.len(), 4);
        assert!(!content.projects.is_empty());
    }

    #[test]
    fn test_duplicate_nav_id_rejected() {
        let mut content = Content::built_in();
        content.nav_links.push(NavLink {
            id: "about".into(),
            title: "About Again".into(),
        });
        assert!(matches!(
            content.validate(),
            Err(ContentError::DuplicateNavId(id)) if id == "about"
        ));
    }

    #[test]
    fn test_invalid_source_link_rejected() {
        let mut content = Content::built_in();
        content.projects[0].source_code_link = "ftp://example.com/repo".into();
        assert!(matches!(
            content.validate(),
            Err(ContentError::InvalidSourceLink { .. })
        ));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "nav_links": [{"id": "about", "title": "About"}],
            "services": [{"title": "Web Developer"}],
            "technologies": [{"name": "Rust"}],
            "experiences": [],
            "testimonials": [],
            "projects": [{
                "name": "Demo",
                "description": "A demo project",
                "source_code_link": "https://github.com/example/demo"
            }]
        }"#;
        let content = Content::from_json_str(json).unwrap();
        assert_eq!(content.technologies[0].name, "Rust");
        assert!(content.projects[0].tags.is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_bad_document() {
        assert!(Content::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_or_built_in_replaces_data_set() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        let mut replacement = Content::built_in();
        replacement.technologies = vec![Technology { name: "Rust".into() }];
        std::fs::write(&path, serde_json::to_string(&replacement).unwrap()).unwrap();

        let content = Content::load_or_built_in(&path).unwrap();
        assert_eq!(content.technologies.len(), 1);
        assert_eq!(content.technologies[0].name, "Rust");
    }

    #[test]
    fn test_load_or_built_in_missing_file_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let content = Content::load_or_built_in(&dir.path().join("content.json")).unwrap();
        assert_eq!(content.nav_links.len(), Content::built_in().nav_links.len());
    }

    #[test]
    fn test_from_file_rejects_invalid_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, "{\"nav_links\": []").unwrap();
        assert!(Content::from_file(&path).is_err());
    }
}
