use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::info;

use super::domain::{CareerDeadline, JobListing, Scholarship};

#[derive(Debug)]
pub enum CatalogueError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
}

impl std::fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogueError::Io(err) => write!(f, "failed to read scholarship export: {}", err),
            CatalogueError::Csv(err) => write!(f, "invalid scholarship CSV data: {}", err),
            CatalogueError::Empty => write!(f, "scholarship export contained no rows"),
        }
    }
}

impl std::error::Error for CatalogueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogueError::Io(err) => Some(err),
            CatalogueError::Csv(err) => Some(err),
            CatalogueError::Empty => None,
        }
    }
}

impl From<std::io::Error> for CatalogueError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogueError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Static career data served while the platform runs in demo mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCatalogue {
    pub scholarships: Vec<Scholarship>,
    pub jobs: Vec<JobListing>,
    pub events: Vec<CareerDeadline>,
}

impl DemoCatalogue {
    pub fn standard() -> Self {
        Self {
            scholarships: vec![
                scholarship(
                    "sch-mahapola",
                    "Mahapola Higher Education Scholarship",
                    &["merit", "need-based", "undergraduate"],
                    Some("2027-03-31"),
                ),
                scholarship(
                    "sch-women-stem",
                    "Women in STEM Bursary",
                    &["STEM", "women", "engineering"],
                    Some("2027-01-15"),
                ),
                scholarship(
                    "sch-arts",
                    "Creative Arts Fellowship",
                    &["arts", "design"],
                    Some("2024-08-30"),
                ),
                scholarship(
                    "sch-sports",
                    "University Sports Excellence Award",
                    &["sports", "leadership"],
                    None,
                ),
            ],
            jobs: vec![
                job("job-101", "Junior React Developer", "Lanka Digital"),
                job("job-102", "Data Analyst Intern", "Ceylon Insights"),
                job("job-103", "Backend Engineer (Node.js)", "Island Cloud"),
                job("job-104", "Community Outreach Assistant", "Hope Foundation"),
            ],
            events: vec![CareerDeadline {
                label: "Campus career fair registration".to_string(),
                deadline: "2027-02-10T17:00:00+05:30".to_string(),
            }],
        }
    }

    /// Replace the built-in scholarships with rows from a CSV export.
    ///
    /// Expected headers: `id,name,tags,deadline`, tags separated by `;`.
    pub fn with_scholarships_from_reader<R: Read>(self, reader: R) -> Result<Self, CatalogueError> {
        let scholarships = parse_scholarships(reader)?;
        if scholarships.is_empty() {
            return Err(CatalogueError::Empty);
        }

        info!(count = scholarships.len(), "loaded scholarship catalogue");
        Ok(Self {
            scholarships,
            ..self
        })
    }

    pub fn with_scholarships_from_path<P: AsRef<Path>>(self, path: P) -> Result<Self, CatalogueError> {
        let file = File::open(path)?;
        self.with_scholarships_from_reader(file)
    }

    /// Scholarship closing dates followed by standalone career events.
    pub fn deadlines(&self) -> Vec<CareerDeadline> {
        self.scholarships
            .iter()
            .filter_map(|scholarship| {
                scholarship.deadline.as_ref().map(|due| CareerDeadline {
                    label: scholarship.name.clone(),
                    deadline: due.clone(),
                })
            })
            .chain(self.events.iter().cloned())
            .collect()
    }
}

fn scholarship(id: &str, name: &str, tags: &[&str], deadline: Option<&str>) -> Scholarship {
    Scholarship {
        id: id.to_string(),
        name: name.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        deadline: deadline.map(str::to_string),
    }
}

fn job(id: &str, title: &str, company: &str) -> JobListing {
    JobListing {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ScholarshipRow {
    id: String,
    name: String,
    #[serde(default)]
    tags: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
}

fn parse_scholarships<R: Read>(reader: R) -> Result<Vec<Scholarship>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut scholarships = Vec::new();

    for record in csv_reader.deserialize::<ScholarshipRow>() {
        let row = record?;
        let tags = row
            .tags
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        scholarships.push(Scholarship {
            id: row.id,
            name: row.name,
            tags,
            deadline: row.deadline,
        });
    }

    Ok(scholarships)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
