// ABOUTME: The user profile collected during onboarding and the typed patch used to update it.
// ABOUTME: Patches merge field by field into the stored profile; unknown patch fields are rejected.

use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize};

use crate::codec::{CodecError, Persisted, from_json, to_json};
use crate::error::ValidationError;

pub const DEFAULT_NAME: &str = "Traveler";
pub const DEFAULT_MOOD_BASELINE: u8 = 5;
pub const MOOD_BASELINE_RANGE: RangeInclusive<u8> = 1..=10;

/// Everything the app knows about its user. Stored as one camelCase JSON
/// object; fields missing from a stored object load with their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub motivation_sources: Vec<String>,
    pub pain_points: Vec<String>,
    pub tone_triggers: Vec<String>,
    pub pledge_signed: bool,
    pub alarm_time: Option<String>,
    pub notifications_enabled: bool,
    pub notification_frequency: String,
    pub app_icon: String,
    pub wellness_focus: Vec<String>,
    pub wellness_obstacles: Vec<String>,
    pub mood_baseline: u8,
    pub goals: Vec<String>,
    pub custom_goal: String,
    pub daily_focus_id: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            age: String::new(),
            gender: String::new(),
            motivation_sources: Vec::new(),
            pain_points: Vec::new(),
            tone_triggers: Vec::new(),
            pledge_signed: false,
            alarm_time: None,
            notifications_enabled: false,
            notification_frequency: "5".to_string(),
            app_icon: "classic".to_string(),
            wellness_focus: Vec::new(),
            wellness_obstacles: Vec::new(),
            mood_baseline: DEFAULT_MOOD_BASELINE,
            goals: Vec::new(),
            custom_goal: String::new(),
            daily_focus_id: None,
        }
    }
}

impl UserProfile {
    /// Focus areas the daily briefing may draw from: the explicit daily focus
    /// when one is set, otherwise wellness focus areas followed by goals.
    pub fn focus_candidates(&self) -> Vec<&str> {
        match &self.daily_focus_id {
            Some(id) => vec![id.as_str()],
            None => self
                .wellness_focus
                .iter()
                .chain(self.goals.iter())
                .map(String::as_str)
                .collect(),
        }
    }
}

impl Persisted for UserProfile {
    fn encode(&self) -> Result<String, CodecError> {
        to_json(self)
    }

    /// A stored mood baseline outside 1-10 loads as the default.
    fn decode(raw: &str) -> Result<Self, CodecError> {
        let mut profile: Self = from_json(raw)?;
        if !MOOD_BASELINE_RANGE.contains(&profile.mood_baseline) {
            profile.mood_baseline = DEFAULT_MOOD_BASELINE;
        }
        Ok(profile)
    }
}

/// Distinguishes an absent field from an explicit `null` in a patch.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial update to a UserProfile. Only fields that are `Some` are
/// written; nullable profile fields use `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub motivation_sources: Option<Vec<String>>,
    pub pain_points: Option<Vec<String>>,
    pub tone_triggers: Option<Vec<String>>,
    pub pledge_signed: Option<bool>,
    #[serde(deserialize_with = "double_option")]
    pub alarm_time: Option<Option<String>>,
    pub notifications_enabled: Option<bool>,
    pub notification_frequency: Option<String>,
    pub app_icon: Option<String>,
    pub wellness_focus: Option<Vec<String>>,
    pub wellness_obstacles: Option<Vec<String>>,
    pub mood_baseline: Option<u8>,
    pub goals: Option<Vec<String>>,
    pub custom_goal: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub daily_focus_id: Option<Option<String>>,
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn motivation_sources<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.motivation_sources = Some(strings(items));
        self
    }

    pub fn pain_points<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pain_points = Some(strings(items));
        self
    }

    pub fn tone_triggers<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tone_triggers = Some(strings(items));
        self
    }

    pub fn pledge_signed(mut self, signed: bool) -> Self {
        self.pledge_signed = Some(signed);
        self
    }

    pub fn alarm_time(mut self, alarm_time: Option<String>) -> Self {
        self.alarm_time = Some(alarm_time);
        self
    }

    pub fn notifications_enabled(mut self, enabled: bool) -> Self {
        self.notifications_enabled = Some(enabled);
        self
    }

    pub fn notification_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.notification_frequency = Some(frequency.into());
        self
    }

    pub fn app_icon(mut self, icon: impl Into<String>) -> Self {
        self.app_icon = Some(icon.into());
        self
    }

    pub fn wellness_focus<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wellness_focus = Some(strings(items));
        self
    }

    pub fn wellness_obstacles<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wellness_obstacles = Some(strings(items));
        self
    }

    pub fn mood_baseline(mut self, baseline: u8) -> Self {
        self.mood_baseline = Some(baseline);
        self
    }

    pub fn goals<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.goals = Some(strings(items));
        self
    }

    pub fn custom_goal(mut self, goal: impl Into<String>) -> Self {
        self.custom_goal = Some(goal.into());
        self
    }

    pub fn daily_focus_id(mut self, focus: Option<String>) -> Self {
        self.daily_focus_id = Some(focus);
        self
    }

    /// Check the patch without touching any profile.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(ValidationError::EmptyName);
        }
        if let Some(baseline) = self.mood_baseline
            && !MOOD_BASELINE_RANGE.contains(&baseline)
        {
            return Err(ValidationError::MoodBaselineOutOfRange(baseline));
        }
        Ok(())
    }

    /// Merge every set field into the profile, leaving the rest unchanged.
    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(v) = self.name {
            profile.name = v;
        }
        if let Some(v) = self.age {
            profile.age = v;
        }
        if let Some(v) = self.gender {
            profile.gender = v;
        }
        if let Some(v) = self.motivation_sources {
            profile.motivation_sources = v;
        }
        if let Some(v) = self.pain_points {
            profile.pain_points = v;
        }
        if let Some(v) = self.tone_triggers {
            profile.tone_triggers = v;
        }
        if let Some(v) = self.pledge_signed {
            profile.pledge_signed = v;
        }
        if let Some(v) = self.alarm_time {
            profile.alarm_time = v;
        }
        if let Some(v) = self.notifications_enabled {
            profile.notifications_enabled = v;
        }
        if let Some(v) = self.notification_frequency {
            profile.notification_frequency = v;
        }
        if let Some(v) = self.app_icon {
            profile.app_icon = v;
        }
        if let Some(v) = self.wellness_focus {
            profile.wellness_focus = v;
        }
        if let Some(v) = self.wellness_obstacles {
            profile.wellness_obstacles = v;
        }
        if let Some(v) = self.mood_baseline {
            profile.mood_baseline = v;
        }
        if let Some(v) = self.goals {
            profile.goals = v;
        }
        if let Some(v) = self.custom_goal {
            profile.custom_goal = v;
        }
        if let Some(v) = self.daily_focus_id {
            profile.daily_focus_id = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_changes_only_set_fields() {
        let mut profile = UserProfile {
            name: "A".to_string(),
            ..UserProfile::default()
        };
        let before = profile.clone();

        ProfilePatch::new().age("18-24").apply(&mut profile);

        assert_eq!(profile.age, "18-24");
        assert_eq!(
            profile,
            UserProfile {
                age: "18-24".to_string(),
                ..before
            }
        );
    }

    #[test]
    fn validate_rejects_blank_name() {
        let patch = ProfilePatch::new().name("   ");
        assert_eq!(patch.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn validate_rejects_mood_baseline_out_of_range() {
        assert_eq!(
            ProfilePatch::new().mood_baseline(0).validate(),
            Err(ValidationError::MoodBaselineOutOfRange(0))
        );
        assert_eq!(
            ProfilePatch::new().mood_baseline(11).validate(),
            Err(ValidationError::MoodBaselineOutOfRange(11))
        );
        assert!(ProfilePatch::new().mood_baseline(10).validate().is_ok());
    }

    #[test]
    fn patch_deserialize_rejects_unknown_fields() {
        let result: Result<ProfilePatch, _> = serde_json::from_str(r#"{"nmae":"typo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_deserialize_distinguishes_null_from_absent() {
        let cleared: ProfilePatch = serde_json::from_str(r#"{"alarmTime":null}"#).unwrap();
        assert_eq!(cleared.alarm_time, Some(None));

        let untouched: ProfilePatch = serde_json::from_str(r#"{"age":"25-34"}"#).unwrap();
        assert_eq!(untouched.alarm_time, None);

        let mut profile = UserProfile {
            alarm_time: Some("2026-01-01T07:00:00Z".to_string()),
            ..UserProfile::default()
        };
        untouched.apply(&mut profile);
        assert!(profile.alarm_time.is_some());
        cleared.apply(&mut profile);
        assert!(profile.alarm_time.is_none());
    }

    #[test]
    fn decode_fills_missing_fields_with_defaults() {
        let profile = UserProfile::decode(r#"{"name":"Sam","goals":["sleep"]}"#).unwrap();
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.goals, vec!["sleep"]);
        assert_eq!(profile.app_icon, "classic");
        assert_eq!(profile.mood_baseline, DEFAULT_MOOD_BASELINE);
    }

    #[test]
    fn decode_replaces_out_of_range_mood_baseline() {
        let zero = UserProfile::decode(r#"{"name":"Sam","moodBaseline":0}"#).unwrap();
        assert_eq!(zero.mood_baseline, DEFAULT_MOOD_BASELINE);
        assert_eq!(zero.name, "Sam");

        let high = UserProfile::decode(r#"{"moodBaseline":42}"#).unwrap();
        assert_eq!(high.mood_baseline, DEFAULT_MOOD_BASELINE);

        let edge = UserProfile::decode(r#"{"moodBaseline":10}"#).unwrap();
        assert_eq!(edge.mood_baseline, 10);
    }

    #[test]
    fn encode_uses_camel_case_keys() {
        let json: serde_json::Value =
            serde_json::from_str(&UserProfile::default().encode().unwrap()).unwrap();
        assert_eq!(json["name"], DEFAULT_NAME);
        assert_eq!(json["moodBaseline"], 5);
        assert!(json["dailyFocusId"].is_null());
    }

    #[test]
    fn focus_candidates_prefer_daily_focus() {
        let profile = UserProfile {
            wellness_focus: vec!["anxiety".to_string()],
            goals: vec!["sleep".to_string()],
            daily_focus_id: Some("calm".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(profile.focus_candidates(), vec!["calm"]);
    }

    #[test]
    fn focus_candidates_fall_back_to_focus_then_goals() {
        let profile = UserProfile {
            wellness_focus: vec!["anxiety".to_string()],
            goals: vec!["sleep".to_string(), "focus".to_string()],
            ..UserProfile::default()
        };
        assert_eq!(profile.focus_candidates(), vec!["anxiety", "sleep", "focus"]);
        assert!(UserProfile::default().focus_candidates().is_empty());
    }
}
