//! Team entity.

/// An NFL team as imported from the sports-data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub coach: String,
    pub owner: Option<String>,
    pub stadium: String,
    pub established: Option<i32>,
    /// Identifier of the team in the external sports-data API.
    pub lookup_id: Option<i64>,
    pub logo: String,
}

/// Input data for inserting a team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub city: String,
    pub coach: String,
    pub owner: Option<String>,
    pub stadium: String,
    pub established: Option<i32>,
    pub lookup_id: Option<i64>,
    pub logo: Option<String>,
}
