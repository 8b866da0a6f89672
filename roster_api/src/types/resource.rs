use std::str::FromStr;

/// List endpoints exposed by the membership console API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Sisters,
    Communities,
    VocationJourneys,
    Evaluations,
    Education,
    Missions,
    HealthRecords,
    Departures,
    Users,
    AuditLog,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Sisters,
        Resource::Communities,
        Resource::VocationJourneys,
        Resource::Evaluations,
        Resource::Education,
        Resource::Missions,
        Resource::HealthRecords,
        Resource::Departures,
        Resource::Users,
        Resource::AuditLog,
    ];

    /// Path of the list endpoint, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Sisters => "/sisters",
            Resource::Communities => "/communities",
            Resource::VocationJourneys => "/vocation-journeys",
            Resource::Evaluations => "/evaluations",
            Resource::Education => "/education",
            Resource::Missions => "/missions",
            Resource::HealthRecords => "/health-records",
            Resource::Departures => "/departures",
            Resource::Users => "/users",
            Resource::AuditLog => "/audit-logs",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Resource::Sisters => "sisters",
                Resource::Communities => "communities",
                Resource::VocationJourneys => "vocation-journeys",
                Resource::Evaluations => "evaluations",
                Resource::Education => "education",
                Resource::Missions => "missions",
                Resource::HealthRecords => "health-records",
                Resource::Departures => "departures",
                Resource::Users => "users",
                Resource::AuditLog => "audit-log",
            }
        )
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.to_string() == s)
            .ok_or(())
    }
}
