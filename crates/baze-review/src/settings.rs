use baze_core::AppConfig;

/// Table and view names the review workflow reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSettings {
    pub profiles_table: String,
    pub profiles_view: String,
    pub experiences_table: String,
    pub operators_table: String,
    pub processes_table: String,
    pub processes_view: String,
    /// Destination of the bulk candidate sync.
    pub sync_table: String,
    /// Maximum number of profiles loaded into one review session.
    pub page_size: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            profiles_table: "lavoratori_selezionati".to_string(),
            profiles_view: "[🔒] Lovable Tinder Database".to_string(),
            experiences_table: "esperienze_lavoratore".to_string(),
            operators_table: "operatori".to_string(),
            processes_table: "processo_res".to_string(),
            processes_view: "[🔐 No Edit] baze_swipe".to_string(),
            sync_table: "Candidates".to_string(),
            page_size: 20,
        }
    }
}

impl ReviewSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.candidates_page_size,
            ..Self::default()
        }
    }
}
