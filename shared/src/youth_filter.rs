//! # Youth Management View Model
//!
//! Age is `current_year - birth_year` with month and day ignored, so a
//! youth moves to the next bucket on January 1st. Age and name predicates
//! combine with AND.

use crate::{name_matches, year_of, FetchPhase, Youth};

/// Inclusive range of ages in years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i32,
    pub max: i32,
}

impl AgeRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: i32) -> bool {
        age >= self.min && age <= self.max
    }
}

impl Default for AgeRange {
    /// Range shown before any preset is selected
    fn default() -> Self {
        Self::new(0, 22)
    }
}

/// The six preset age buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    Toddler,
    Preschool,
    Child,
    EarlyTeen,
    LateTeen,
    YoungAdult,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 6] = [
        AgeBucket::Toddler,
        AgeBucket::Preschool,
        AgeBucket::Child,
        AgeBucket::EarlyTeen,
        AgeBucket::LateTeen,
        AgeBucket::YoungAdult,
    ];

    pub fn range(&self) -> AgeRange {
        match self {
            AgeBucket::Toddler => AgeRange::new(0, 2),
            AgeBucket::Preschool => AgeRange::new(3, 5),
            AgeBucket::Child => AgeRange::new(6, 10),
            AgeBucket::EarlyTeen => AgeRange::new(11, 15),
            AgeBucket::LateTeen => AgeRange::new(16, 20),
            AgeBucket::YoungAdult => AgeRange::new(21, 22),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Toddler => "0-2 years",
            AgeBucket::Preschool => "3-5 years",
            AgeBucket::Child => "6-10 years",
            AgeBucket::EarlyTeen => "11-15 years",
            AgeBucket::LateTeen => "16-20 years",
            AgeBucket::YoungAdult => "21-22 years",
        }
    }

    /// The preset whose range equals `range`, if any
    pub fn for_range(range: AgeRange) -> Option<AgeBucket> {
        Self::ALL.into_iter().find(|bucket| bucket.range() == range)
    }
}

/// Calendar-naive age in `year`; `None` when the birthday does not parse
pub fn age_in_year(birthday: &str, year: i32) -> Option<i32> {
    year_of(birthday).map(|birth_year| year - birth_year)
}

/// Active age range plus the name search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YouthFilter {
    pub age_range: AgeRange,
    pub query: String,
}

impl YouthFilter {
    /// Replace the active range with the preset's
    pub fn select_bucket(&mut self, bucket: AgeBucket) {
        self.age_range = bucket.range();
    }

    pub fn active_bucket(&self) -> Option<AgeBucket> {
        AgeBucket::for_range(self.age_range)
    }

    pub fn matches(&self, youth: &Youth, current_year: i32) -> bool {
        let in_range = age_in_year(&youth.birthday, current_year)
            .map(|age| self.age_range.contains(age))
            .unwrap_or(false);
        in_range && name_matches(&youth.first_name, &youth.last_name, &self.query)
    }

    pub fn apply<'a>(&self, youths: &'a [Youth], current_year: i32) -> Vec<&'a Youth> {
        youths
            .iter()
            .filter(|youth| self.matches(youth, current_year))
            .collect()
    }
}

/// State of the youth management view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YouthManagementModel {
    youths: Vec<Youth>,
    loading: bool,
    fetched: bool,
    error: Option<String>,
    pub filter: YouthFilter,
    show_dialog: bool,
    refresh_trigger: u32,
}

impl YouthManagementModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn youth_loaded(&mut self, result: Result<Vec<Youth>, String>) {
        match result {
            Ok(youths) => self.youths = youths,
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
        self.fetched = true;
    }

    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if let Some(message) = &self.error {
            FetchPhase::Error(message.clone())
        } else if self.fetched {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }

    pub fn youths(&self) -> &[Youth] {
        &self.youths
    }

    pub fn visible(&self, current_year: i32) -> Vec<&Youth> {
        self.filter.apply(&self.youths, current_year)
    }

    pub fn select_bucket(&mut self, bucket: AgeBucket) {
        self.filter.select_bucket(bucket);
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn toggle_dialog(&mut self) {
        self.show_dialog = !self.show_dialog;
    }

    pub fn is_dialog_open(&self) -> bool {
        self.show_dialog
    }

    /// A youth was created: close the dialog and trigger a re-fetch
    pub fn youth_created(&mut self) {
        self.show_dialog = false;
        self.refresh_trigger = self.refresh_trigger.wrapping_add(1);
    }

    pub fn refresh_trigger(&self) -> u32 {
        self.refresh_trigger
    }
}
