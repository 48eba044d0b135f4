use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ClassCount, CurriculumMetadata};

use super::text::DocumentText;

static COURSE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Curso:\s*(\d{3})").unwrap());
static CURRICULUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Curr[ií]culo:\s*(\d{4}/\d)").unwrap());
static WEEKLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Numero\s*Aulas\s*\(semanal\)\s*[:\-\s]*([0-9.,]+)").unwrap());
static MIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Aulas\s*M[ií]nimas\s*[:\-\s]*([0-9.,]+)").unwrap());
static AVG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Aulas\s*M[eé]dia\s*[:\-\s]*([0-9.,]+)").unwrap());
static MAX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Aulas\s*M[aá]xima?s?\s*[:\-\s]*([0-9.,]+)").unwrap());

/// Scan the whole document once per label. Fields whose label is missing stay `None`.
/// Class statistics are read from ASCII digits only.
pub fn extract(text: &DocumentText) -> CurriculumMetadata {
    let text = text.as_str();
    let mut info = CurriculumMetadata {
        course_code: first_capture(&COURSE_CODE_RE, text).map(str::to_string),
        curriculum_id: first_capture(&CURRICULUM_RE, text).map(|id| id.replace('/', "")),
        ..Default::default()
    };

    // Both labels feed minClasses; the minimum-classes label is checked last and wins.
    if let Some(raw) = first_capture(&WEEKLY_RE, text) {
        info.min_classes = parse_number(raw);
    }
    if let Some(raw) = first_capture(&MIN_RE, text) {
        info.min_classes = parse_number(raw);
    }
    if let Some(raw) = first_capture(&AVG_RE, text) {
        info.avg_classes = parse_number(raw);
    }
    if let Some(raw) = first_capture(&MAX_RE, text) {
        info.max_classes = parse_number(raw);
    }

    info
}

fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Parse a pt-BR formatted number: "." groups thousands, "," marks decimals.
/// "1.234,5" is 1234.5, "1.234" is 1234. Anything unparseable is `None`.
pub fn parse_number(raw: &str) -> Option<ClassCount> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    if normalized.contains('.') {
        normalized.parse::<f64>().ok().map(ClassCount::Decimal)
    } else {
        normalized.parse::<i64>().ok().map(ClassCount::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(text: &str) -> CurriculumMetadata {
        extract(&DocumentText::from(text))
    }

    #[test]
    fn thousands_and_decimal_separators() {
        assert_eq!(parse_number("1.234,5"), Some(ClassCount::Decimal(1234.5)));
        assert_eq!(parse_number("1.234"), Some(ClassCount::Integer(1234)));
        assert_eq!(parse_number("18"), Some(ClassCount::Integer(18)));
        assert_eq!(parse_number("18,0"), Some(ClassCount::Decimal(18.0)));
    }

    #[test]
    fn malformed_numbers_are_absent() {
        assert_eq!(parse_number(","), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1,2,3"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn course_code_and_curriculum() {
        let m = meta("Curso: 208 - Arquitetura e Urbanismo\nCurrículo: 2021/1\n");
        assert_eq!(m.course_code.as_deref(), Some("208"));
        assert_eq!(m.curriculum_id.as_deref(), Some("20211"));
    }

    #[test]
    fn curriculum_label_is_case_insensitive_and_accent_optional() {
        assert_eq!(meta("CURRICULO: 2007/1").curriculum_id.as_deref(), Some("20071"));
        assert_eq!(meta("currículo:2019/2").curriculum_id.as_deref(), Some("20192"));
    }

    #[test]
    fn course_code_label_is_case_sensitive() {
        assert_eq!(meta("CURSO: 208").course_code, None);
        assert_eq!(meta("curso: 208").course_code, None);
    }

    #[test]
    fn minimum_label_wins_over_weekly() {
        let m = meta("Numero Aulas (semanal): 20\nAulas Mínimas: 18\n");
        assert_eq!(m.min_classes, Some(ClassCount::Integer(18)));
    }

    #[test]
    fn non_ascii_digits_do_not_form_a_statistic() {
        assert_eq!(meta("Aulas Mínimas: ١٨").min_classes, None);
        let m = meta("Numero Aulas (semanal): 20\nAulas Mínimas: ١٨\n");
        assert_eq!(m.min_classes, Some(ClassCount::Integer(20)));
    }

    #[test]
    fn weekly_label_alone_sets_minimum() {
        let m = meta("Numero Aulas (semanal) - 22");
        assert_eq!(m.min_classes, Some(ClassCount::Integer(22)));
    }

    #[test]
    fn average_and_maximum() {
        let m = meta("Aulas Média: 1.234,5\nAulas Máximas: 30\n");
        assert_eq!(m.avg_classes, Some(ClassCount::Decimal(1234.5)));
        assert_eq!(m.max_classes, Some(ClassCount::Integer(30)));

        let m = meta("aulas maxima 28");
        assert_eq!(m.max_classes, Some(ClassCount::Integer(28)));
    }

    #[test]
    fn malformed_statistic_is_omitted() {
        let m = meta("Aulas Média: ,\nAulas Máximas: 30");
        assert_eq!(m.avg_classes, None);
        assert_eq!(m.max_classes, Some(ClassCount::Integer(30)));
    }

    #[test]
    fn no_labels() {
        assert_eq!(meta("nothing to see here"), CurriculumMetadata::default());
    }
}
