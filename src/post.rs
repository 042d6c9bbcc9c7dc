//! Channel announcements: tag line handling and message helpers.
//!
//! An administrator's message may open with a tag line:
//!
//! ```text
//! #курс #спглмат #дз          <- tag line (first line containing '#')
//! Контрольная 5.09, Иванов Иван отвечает за рассылку.
//! ```
//!
//! Published posts repeat the tags, a blank line and the body.

use crate::{Admin, ResolvedPerson};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use thiserror::Error;

/// Which tags a post must carry.
///
/// A post needs the main tag, or the course tag together with one of the
/// course-name tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPolicy {
    pub main_tag: String,
    pub course_tag: String,
    pub course_name_tags: Vec<String>,
}

impl Default for TagPolicy {
    fn default() -> Self {
        TagPolicy {
            main_tag: "#общее".to_string(),
            course_tag: "#курс".to_string(),
            course_name_tags: ["#спглмат", "#моипис", "#битис", "#коммнир", "#сппр", "#иняз"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A missing required tag. Messages are shown to the administrator as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("- Отсутствует тег с названием курса (возможные значения: {})", .expected.join(", "))]
    MissingCourseName { expected: Vec<String> },

    #[error("- Отсутствует главный тег (возможные значения {main}, {course})")]
    MissingMainTag { main: String, course: String },
}

impl TagPolicy {
    pub fn validate(&self, tags: &BTreeSet<String>) -> Vec<TagError> {
        if tags.contains(&self.main_tag) {
            return Vec::new();
        }
        if !tags.contains(&self.course_tag) {
            return vec![TagError::MissingMainTag { main: self.main_tag.clone(), course: self.course_tag.clone() }];
        }
        if self.course_name_tags.iter().any(|tag| tags.contains(tag)) {
            Vec::new()
        } else {
            vec![TagError::MissingCourseName { expected: self.course_name_tags.clone() }]
        }
    }

    /// Render order: main and course tags, then course names, then the rest.
    fn rank(&self, tag: &str) -> u8 {
        if tag == self.main_tag || tag == self.course_tag {
            0
        } else if self.course_name_tags.iter().any(|t| t == tag) {
            1
        } else {
            2
        }
    }
}

/// Tags from a tag line: `"#курс #дз"`, `"#курс#дз"` and `"курс #дз"` all
/// give `{#курс, #дз}`.
pub fn parse_tags(tagline: &str) -> BTreeSet<String> {
    tagline.split('#').map(str::trim).filter(|tag| !tag.is_empty()).map(|tag| format!("#{tag}")).collect()
}

/// An announcement split into tags and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub tags: BTreeSet<String>,
    pub body: String,
}

impl Post {
    /// Split a message into its tag line (the first line, if it contains `#`)
    /// and body. Without a tag line the whole message is the body.
    pub fn parse(message: &str) -> Self {
        let (first, rest) = message.split_once('\n').unwrap_or((message, ""));
        if first.contains('#') {
            Post { tags: parse_tags(first), body: rest.to_string() }
        } else {
            Post { tags: BTreeSet::new(), body: message.to_string() }
        }
    }

    /// Merge tags from a tag line sent after the message.
    pub fn add_tags(&mut self, tagline: &str) {
        self.tags.extend(parse_tags(tagline));
    }

    pub fn validate_tags(&self, policy: &TagPolicy) -> Vec<TagError> {
        policy.validate(&self.tags)
    }

    /// The published text: tags, a blank line, the body.
    pub fn render(&self, policy: &TagPolicy) -> String {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_by_key(|tag| policy.rank(tag));
        format!("{}\n\n{}", tags.join(" "), self.body)
    }
}

/// Short date as shown to the administrator, e.g. `05.09.24`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%d.%m.%y").to_string()
}

/// One `- Name (@handle)` line per person with a full name.
pub fn person_list(persons: &[ResolvedPerson<'_>]) -> String {
    persons
        .iter()
        .filter(|p| p.record.is_full())
        .map(|p| format!("- {} ({})", p.display_name(), p.contact_handle().unwrap_or("n/a")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mentioned persons worth notifying: full name and a known handle.
pub fn notification_targets<'r>(persons: impl IntoIterator<Item = ResolvedPerson<'r>>) -> Vec<ResolvedPerson<'r>> {
    persons.into_iter().filter(|p| p.record.is_full() && p.contact_handle().is_some()).collect()
}

/// `username` is given without the leading `@`.
pub fn is_admin(admins: &[Admin], username: &str) -> bool {
    let handle = format!("@{username}");
    admins.iter().any(|admin| admin.username == handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KnownPerson, resolve_persons};

    fn tags(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn tag_line_is_split_from_body() {
        let post = Post::parse("#курс #спглмат #дз\nКонтрольная 5.09\nне опаздывать");
        assert_eq!(post.tags, tags(&["#курс", "#спглмат", "#дз"]));
        assert_eq!(post.body, "Контрольная 5.09\nне опаздывать");
    }

    #[test]
    fn message_without_tag_line_is_all_body() {
        let post = Post::parse("Контрольная 5.09\n#курс");
        assert!(post.tags.is_empty());
        assert_eq!(post.body, "Контрольная 5.09\n#курс");
    }

    #[test]
    fn tags_parse_with_or_without_spaces() {
        assert_eq!(parse_tags("#курс#дз"), tags(&["#курс", "#дз"]));
        assert_eq!(parse_tags("  #курс   #дз "), tags(&["#курс", "#дз"]));
        assert_eq!(parse_tags("курс #дз"), tags(&["#курс", "#дз"]));
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn tag_validation() {
        let policy = TagPolicy::default();
        assert!(policy.validate(&tags(&["#общее"])).is_empty());
        assert!(policy.validate(&tags(&["#курс", "#иняз"])).is_empty());

        let missing_course = policy.validate(&tags(&["#курс", "#дз"]));
        assert_eq!(
            missing_course.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["- Отсутствует тег с названием курса (возможные значения: #спглмат, #моипис, #битис, #коммнир, #сппр, #иняз)"]
        );

        let missing_main = policy.validate(&tags(&["#дз"]));
        assert_eq!(
            missing_main.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["- Отсутствует главный тег (возможные значения #общее, #курс)"]
        );
    }

    #[test]
    fn resent_tags_are_merged() {
        let policy = TagPolicy::default();
        let mut post = Post::parse("#курс\nКонтрольная");
        assert_eq!(post.validate_tags(&policy).len(), 1);
        post.add_tags("#сппр");
        assert!(post.validate_tags(&policy).is_empty());
    }

    #[test]
    fn render_puts_main_tags_first() {
        let post = Post::parse("#дз #сппр #курс\nКонтрольная 5.09");
        assert_eq!(post.render(&TagPolicy::default()), "#курс #сппр #дз\n\nКонтрольная 5.09");
    }

    #[test]
    fn date_label_is_short() {
        assert_eq!(date_label(NaiveDate::from_ymd_opt(2024, 9, 5).unwrap()), "05.09.24");
    }

    #[test]
    fn person_list_and_notification_targets() {
        let registry: Vec<KnownPerson> = serde_json::from_str(
            r#"[{"first_name": "Иван", "last_name": "Иванов", "telegram": "@ivanov"},
                {"first_name": "Мария", "last_name": "Петрова"}]"#,
        )
        .unwrap();

        let persons: Vec<_> = resolve_persons("Иван Иванов, Мария Петрова, Олег", &registry).collect();
        assert_eq!(persons.len(), 3);
        assert_eq!(person_list(&persons), "- Иванов Иван (@ivanov)\n- Петрова Мария (n/a)");

        let targets = notification_targets(persons);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].contact_handle(), Some("@ivanov"));
    }

    #[test]
    fn admin_check_adds_at_sign() {
        let admins = vec![Admin { username: "@boss".into() }];
        assert!(is_admin(&admins, "boss"));
        assert!(!is_admin(&admins, "@boss"));
        assert!(!is_admin(&admins, "intern"));
    }
}
