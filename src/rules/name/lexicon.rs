//! Russian personal-name lexicon.
//!
//! First names come from a fixed list with generated case forms. Patronymics
//! and surnames are recognized by suffix, so they need no list.
//!
//! ```text
//! Ивана     -> FIRST  иван (male)
//! Петровной -> MIDDLE петровна (female)
//! Ивановой  -> LAST   иванов / иванова, picked by gender
//! ```

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRole {
    First,
    Middle,
    Last,
    /// A capitalized word that is none of the above.
    Word,
}

/// One recognized word of a personal name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamePart {
    pub role: NameRole,
    /// Lowercased, as written.
    pub word: String,
    /// Gender implied by the word alone, if unambiguous.
    pub gender: Option<Gender>,
}

const MALE_NAMES: &[&str] = &[
    "александр", "алексей", "анатолий", "андрей", "антон", "аркадий", "артём", "артем", "богдан", "борис",
    "вадим", "валерий", "василий", "виктор", "владимир", "владислав", "всеволод", "вячеслав", "георгий", "глеб",
    "григорий", "даниил", "денис", "дмитрий", "евгений", "егор", "иван", "игорь", "илья", "кирилл", "константин",
    "лев", "леонид", "максим", "марк", "матвей", "михаил", "никита", "николай", "олег", "павел", "пётр", "петр",
    "роман", "руслан", "семён", "семен", "сергей", "станислав", "степан", "тимофей", "тимур", "фёдор", "федор",
    "филипп", "эдуард", "юрий", "ярослав",
];

const FEMALE_NAMES: &[&str] = &[
    "александра", "алёна", "алена", "алина", "алиса", "анастасия", "ангелина", "анна", "валентина", "варвара",
    "вера", "вероника", "виктория", "галина", "дарья", "диана", "евгения", "екатерина", "елена", "елизавета",
    "зоя", "ирина", "кристина", "ксения", "лариса", "людмила", "марина", "мария", "милана", "надежда", "наталья",
    "нина", "оксана", "ольга", "полина", "светлана", "софья", "татьяна", "ульяна", "юлия", "яна",
];

/// Male names whose stem changes when declined.
const FLEETING_STEMS: &[(&str, &str)] = &[("павел", "павл"), ("пётр", "петр"), ("петр", "петр"), ("лев", "льв")];

fn male_forms(name: &str) -> Vec<String> {
    if let Some((_, stem)) = FLEETING_STEMS.iter().find(|(nom, _)| *nom == name) {
        return ["а", "у", "ом", "е"].iter().map(|e| format!("{stem}{e}")).collect();
    }
    if let Some(stem) = name.strip_suffix('й').or_else(|| name.strip_suffix('ь')) {
        return ["я", "ю", "ем", "е", "и"].iter().map(|e| format!("{stem}{e}")).collect();
    }
    if name.ends_with('а') || name.ends_with('я') {
        return female_forms(name);
    }
    ["а", "у", "ом", "е"].iter().map(|e| format!("{name}{e}")).collect()
}

fn female_forms(name: &str) -> Vec<String> {
    if let Some(stem) = name.strip_suffix('я') {
        return ["и", "е", "ю", "ей", "ёй", "ею"].iter().map(|e| format!("{stem}{e}")).collect();
    }
    if let Some(stem) = name.strip_suffix('а') {
        let genitive = if stem.ends_with(['г', 'к', 'х', 'ж', 'ш', 'ч', 'щ']) { "и" } else { "ы" };
        return [genitive, "е", "у", "ой", "ою"].iter().map(|e| format!("{stem}{e}")).collect();
    }
    Vec::new()
}

/// Every first-name form mapped to its nominative and gender. A nominative
/// always wins over a case form spelled the same ("александра").
static FIRST_NAMES: Lazy<HashMap<String, (&'static str, Gender)>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &name in MALE_NAMES {
        map.insert(name.to_string(), (name, Gender::Male));
    }
    for &name in FEMALE_NAMES {
        map.insert(name.to_string(), (name, Gender::Female));
    }
    for &name in MALE_NAMES {
        for form in male_forms(name) {
            map.entry(form).or_insert((name, Gender::Male));
        }
    }
    for &name in FEMALE_NAMES {
        for form in female_forms(name) {
            map.entry(form).or_insert((name, Gender::Female));
        }
    }
    map
});

/// Nominative and gender of a first name in any case form.
pub fn first_name(lower: &str) -> Option<(&'static str, Gender)> {
    FIRST_NAMES.get(lower).copied()
}

const MALE_PATRONYMIC_ENDINGS: &[&str] = &["", "а", "у", "ем", "е"];
const FEMALE_PATRONYMIC_STEMS: &[&str] = &["овн", "евн", "ичн"];
const FEMALE_PATRONYMIC_ENDINGS: &[&str] = &["а", "ы", "е", "у", "ой", "ою"];

fn long_enough(stem: &str) -> bool {
    stem.chars().count() >= 2
}

/// Nominative and gender of a patronymic in any case form.
pub fn patronymic(lower: &str) -> Option<(String, Gender)> {
    for &ending in MALE_PATRONYMIC_ENDINGS {
        if let Some(stem) = lower.strip_suffix(ending).and_then(|w| w.strip_suffix("ич")) {
            if long_enough(stem) {
                return Some((format!("{stem}ич"), Gender::Male));
            }
        }
    }
    for &ending in FEMALE_PATRONYMIC_ENDINGS {
        let Some(base) = lower.strip_suffix(ending) else { continue };
        for &suffix in FEMALE_PATRONYMIC_STEMS {
            if let Some(stem) = base.strip_suffix(suffix) {
                if long_enough(stem) {
                    return Some((format!("{stem}{suffix}а"), Gender::Female));
                }
            }
        }
    }
    None
}

/// A surname ending: `suffix` following a family base such as `ов`, and the
/// nominative replacement for each gender the form can belong to.
struct SurnameEnding {
    suffix: String,
    male: Option<String>,
    female: Option<String>,
}

static SURNAME_ENDINGS: Lazy<Vec<SurnameEnding>> = Lazy::new(|| {
    let mut endings = Vec::new();
    let mut push = |suffix: String, male: Option<String>, female: Option<String>| {
        endings.push(SurnameEnding { suffix, male, female })
    };

    for base in ["ов", "ев", "ёв", "ин", "ын"] {
        let (m, f) = (base.to_string(), format!("{base}а"));
        push(base.to_string(), Some(m.clone()), None);
        push(format!("{base}а"), Some(m.clone()), Some(f.clone()));
        push(format!("{base}у"), Some(m.clone()), Some(f.clone()));
        push(format!("{base}ым"), Some(m.clone()), None);
        push(format!("{base}е"), Some(m), None);
        push(format!("{base}ой"), None, Some(f.clone()));
        push(format!("{base}ою"), None, Some(f));
    }
    for base in ["ск", "цк"] {
        let (m, f) = (format!("{base}ий"), format!("{base}ая"));
        push(format!("{base}ий"), Some(m.clone()), None);
        for oblique in ["ого", "ому", "им", "ом"] {
            push(format!("{base}{oblique}"), Some(m.clone()), None);
        }
        push(format!("{base}ая"), None, Some(f.clone()));
        push(format!("{base}ую"), None, Some(f.clone()));
        push(format!("{base}ой"), Some(format!("{base}ой")), Some(f));
    }
    for fixed in ["ко", "ук", "юк", "ян", "дзе", "швили", "их", "ых"] {
        push(fixed.to_string(), Some(fixed.to_string()), Some(fixed.to_string()));
    }

    endings.sort_by_key(|e| std::cmp::Reverse(e.suffix.chars().count()));
    endings
});

/// A word recognized as a surname by its ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surname {
    stem: String,
    male: Option<String>,
    female: Option<String>,
}

impl Surname {
    /// Gender implied by the form alone ("Иванов" is male, "Ивановой" female).
    pub fn gender(&self) -> Option<Gender> {
        match (&self.male, &self.female) {
            (Some(_), None) => Some(Gender::Male),
            (None, Some(_)) => Some(Gender::Female),
            _ => None,
        }
    }

    /// Nominative form for `gender`, or `surface` when it cannot be decided.
    pub fn nominative(&self, gender: Option<Gender>, surface: &str) -> String {
        let ending = match gender.or(self.gender()) {
            Some(Gender::Male) => self.male.as_ref(),
            Some(Gender::Female) => self.female.as_ref(),
            None => None,
        };
        match ending {
            Some(ending) => format!("{}{}", self.stem, ending),
            None => surface.to_string(),
        }
    }
}

/// Common words that end like a surname and open sentences.
const NOT_SURNAMES: &[&str] = &[
    "один", "готов", "готова", "каков", "таков", "здоров", "наших", "ваших", "своих", "моих", "твоих",
    "других", "этих", "каких", "таких", "многих", "некоторых", "самых", "каждых", "только", "сколько",
    "столько", "далеко", "недалеко", "легко", "близко",
];

/// Recognize a (lowercase) surname. First names, patronymics and common
/// words are not surnames even when their ending fits.
pub fn surname(lower: &str) -> Option<Surname> {
    if first_name(lower).is_some() || patronymic(lower).is_some() || NOT_SURNAMES.contains(&lower) {
        return None;
    }
    SURNAME_ENDINGS.iter().find_map(|ending| {
        let stem = lower.strip_suffix(ending.suffix.as_str())?;
        long_enough(stem).then(|| Surname {
            stem: stem.to_string(),
            male: ending.male.clone(),
            female: ending.female.clone(),
        })
    })
}

/// Classify a lowercase capitalized word.
pub fn classify(lower: &str) -> NamePart {
    let (role, gender) = if let Some((_, gender)) = first_name(lower) {
        (NameRole::First, Some(gender))
    } else if let Some((_, gender)) = patronymic(lower) {
        (NameRole::Middle, Some(gender))
    } else if let Some(surname) = surname(lower) {
        (NameRole::Last, surname.gender())
    } else {
        (NameRole::Word, None)
    };
    NamePart { role, word: lower.to_string(), gender }
}

/// Nominative (lowercase) of `part`, declined for `gender` where that matters.
pub fn nominative(part: &NamePart, gender: Option<Gender>) -> String {
    let declined = match part.role {
        NameRole::First => first_name(&part.word).map(|(nom, _)| nom.to_string()),
        NameRole::Middle => patronymic(&part.word).map(|(nom, _)| nom),
        NameRole::Last => surname(&part.word).map(|s| s.nominative(gender, &part.word)),
        NameRole::Word => None,
    };
    declined.unwrap_or_else(|| part.word.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_name_case_forms() {
        let cases = [
            ("иван", "иван", Gender::Male),
            ("ивану", "иван", Gender::Male),
            ("сергея", "сергей", Gender::Male),
            ("игорем", "игорь", Gender::Male),
            ("павла", "павел", Gender::Male),
            ("никиты", "никита", Gender::Male),
            ("марии", "мария", Gender::Female),
            ("ольги", "ольга", Gender::Female),
            ("натальей", "наталья", Gender::Female),
            ("александра", "александра", Gender::Female),
        ];
        for (form, nom, gender) in cases {
            assert_eq!(first_name(form), Some((nom, gender)), "first_name({form})");
        }
        assert_eq!(first_name("стол"), None);
    }

    #[test]
    fn patronymics() {
        assert_eq!(patronymic("иванович"), Some(("иванович".to_string(), Gender::Male)));
        assert_eq!(patronymic("сергеевичем"), Some(("сергеевич".to_string(), Gender::Male)));
        assert_eq!(patronymic("ильич"), Some(("ильич".to_string(), Gender::Male)));
        assert_eq!(patronymic("петровной"), Some(("петровна".to_string(), Gender::Female)));
        assert_eq!(patronymic("ильиничны"), Some(("ильинична".to_string(), Gender::Female)));
        assert_eq!(patronymic("иванова"), None);
    }

    #[test]
    fn surnames_decline_by_gender() {
        let ivanova = surname("иванова").unwrap();
        assert_eq!(ivanova.gender(), None);
        assert_eq!(ivanova.nominative(Some(Gender::Male), "иванова"), "иванов");
        assert_eq!(ivanova.nominative(Some(Gender::Female), "иванова"), "иванова");
        assert_eq!(ivanova.nominative(None, "иванова"), "иванова");

        assert_eq!(surname("ивановой").unwrap().nominative(None, "ивановой"), "иванова");
        assert_eq!(surname("петровым").unwrap().gender(), Some(Gender::Male));
        assert_eq!(surname("достоевского").unwrap().nominative(None, "достоевского"), "достоевский");
        for word in ["один", "готов", "наших", "только"] {
            assert_eq!(surname(word), None, "surname({word})");
        }
        assert_eq!(surname("вишневскую").unwrap().nominative(None, "вишневскую"), "вишневская");
        assert_eq!(surname("шевченко").unwrap().nominative(Some(Gender::Female), "шевченко"), "шевченко");
    }

    #[test]
    fn names_and_common_words_are_not_surnames() {
        for word in ["марина", "иванович", "стол", "ов"] {
            assert_eq!(surname(word), None, "surname({word})");
        }
    }

    #[test]
    fn classify_assigns_roles() {
        assert_eq!(classify("иван").role, NameRole::First);
        assert_eq!(classify("ивановна").role, NameRole::Middle);
        assert_eq!(classify("кузнецов").role, NameRole::Last);
        assert_eq!(classify("смит").role, NameRole::Word);
    }
}
