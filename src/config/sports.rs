use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sport {
    Hockey,
    Basketball,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Hockey => "hockey",
            Sport::Basketball => "basketball",
        }
    }

    /// Name of the table holding this sport's games.
    pub fn collection(&self) -> &'static str {
        match self {
            Sport::Hockey => "hockey_scores",
            Sport::Basketball => "basketball_scores",
        }
    }

    pub fn default_league_name(&self) -> &'static str {
        match self {
            Sport::Hockey => "NHL",
            Sport::Basketball => "NBA",
        }
    }

    pub fn default_league_id(&self) -> u32 {
        match self {
            Sport::Hockey => 57,
            Sport::Basketball => 12,
        }
    }

    pub fn default_provider_host(&self) -> &'static str {
        match self {
            Sport::Hockey => "v1.hockey.api-sports.io",
            Sport::Basketball => "v1.basketball.api-sports.io",
        }
    }

    /// Season requested when a sync is triggered without a date. The free
    /// provider tier only serves these seasons in full.
    pub fn default_season(&self) -> &'static str {
        match self {
            Sport::Hockey => "2023",
            Sport::Basketball => "2023-2024",
        }
    }

    pub fn all() -> [Sport; 2] {
        [Sport::Hockey, Sport::Basketball]
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that differs between two sports' sync and query paths.
#[derive(Debug, Clone)]
pub struct SportConfig {
    pub sport: Sport,
    pub league_id: u32,
    pub provider_base_url: String,
    pub provider_host: String,
    pub default_league_name: String,
    pub season_default: String,
}

impl SportConfig {
    pub fn new(sport: Sport, provider_base_url: impl Into<String>) -> Self {
        Self {
            sport,
            league_id: sport.default_league_id(),
            provider_base_url: provider_base_url.into(),
            provider_host: sport.default_provider_host().to_string(),
            default_league_name: sport.default_league_name().to_string(),
            season_default: sport.default_season().to_string(),
        }
    }

    /// Endpoint listing games for this sport's provider sub-host.
    pub fn games_endpoint(&self) -> String {
        format!("{}/games", self.provider_base_url.trim_end_matches('/'))
    }
}
