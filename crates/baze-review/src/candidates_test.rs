use baze_airtable::AirtableRecord;
use serde_json::{json, Value};

use super::*;

fn profile(id: &str, fields: Value) -> ProfileRecord {
    match fields {
        Value::Object(map) => ProfileRecord::from_record(&AirtableRecord::new(id, map)),
        _ => panic!("fixture must be an object"),
    }
}

fn query(name: &str, id: &str, display: &str, record: &str) -> CandidateQuery {
    CandidateQuery {
        recruiter_name: Some(name.to_string()),
        recruiter_id: Some(id.to_string()),
        process_display_id: Some(display.to_string()),
        process_record_id: Some(record.to_string()),
    }
}

#[test]
fn profile_formula_with_only_status_filter() {
    assert_eq!(
        profile_formula(&CandidateQuery::default()).to_string(),
        "OR({stato_selezione}='Candidato - Good fit',{stato_selezione}='Prospetto',{stato_selezione}='Candidato - Poor fit')"
    );
}

#[test]
fn profile_formula_escapes_recruiter_and_process() {
    let q = CandidateQuery {
        recruiter_name: Some("D'Angelo".to_string()),
        process_display_id: Some("P1".to_string()),
        ..CandidateQuery::default()
    };
    assert_eq!(
        profile_formula(&q).to_string(),
        "AND(\
OR({recruiter_processo_res}='D\\'Angelo',FIND('D\\'Angelo', ARRAYJOIN({recruiter_processo_res}, ','))>0),\
OR(FIND('P1', ARRAYJOIN({processo_res}, ','))>0,{record_id_processo}='P1'),\
OR({stato_selezione}='Candidato - Good fit',{stato_selezione}='Prospetto',{stato_selezione}='Candidato - Poor fit'))"
    );
}

#[test]
fn profile_formula_ignores_blank_criteria() {
    let q = CandidateQuery {
        recruiter_name: Some("   ".to_string()),
        ..CandidateQuery::default()
    };
    assert_eq!(
        profile_formula(&q).to_string(),
        profile_formula(&CandidateQuery::default()).to_string()
    );
}

#[test]
fn experience_formula_is_none_without_ids() {
    assert!(experience_formula(&[]).is_none());
}

#[test]
fn experience_formula_ors_escaped_ids() {
    let formula = experience_formula(&["recW1".to_string(), "rec'W2".to_string()]).unwrap();
    assert_eq!(
        formula.to_string(),
        "OR(FIND('recW1', ARRAYJOIN({id_lavoratore}))>0,FIND('rec\\'W2', ARRAYJOIN({id_lavoratore}))>0)"
    );
}

#[test]
fn parse_travel_minutes_variants() {
    assert!((parse_travel_minutes(Some("12 min")) - 12.0).abs() < f64::EPSILON);
    assert!((parse_travel_minutes(Some("circa 7MIN in auto")) - 7.0).abs() < f64::EPSILON);
    assert!((parse_travel_minutes(Some("25")) - 25.0).abs() < f64::EPSILON);
    assert!((parse_travel_minutes(Some("1 h 5")) - 15.0).abs() < f64::EPSILON);
    assert!(parse_travel_minutes(Some("lontano")).is_infinite());
    assert!(parse_travel_minutes(Some("")).is_infinite());
    assert!(parse_travel_minutes(None).is_infinite());
}

#[test]
fn sort_orders_by_status_then_travel_time() {
    let mut profiles = vec![
        profile(
            "recPoor",
            json!({ "stato_selezione": "Candidato - Poor fit", "travel_time_tra_cap": "10 min" }),
        ),
        profile(
            "recGood",
            json!({ "stato_selezione": "Candidato - Good fit", "travel_time_tra_cap": "5 min" }),
        ),
        profile(
            "recProspect",
            json!({ "stato_selezione": "Prospetto", "travel_time_tra_cap": "3 min" }),
        ),
    ];
    sort_candidates(&mut profiles);
    let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["recGood", "recProspect", "recPoor"]);
}

#[test]
fn sort_puts_unknown_status_and_travel_time_last() {
    let mut profiles = vec![
        profile("recOther", json!({ "stato_selezione": "Altro", "travel_time_tra_cap": "1 min" })),
        profile("recNoTime", json!({ "stato_selezione": "Prospetto" })),
        profile(
            "recTimed",
            json!({ "stato_selezione": "Prospetto", "travel_time_tra_cap": "40 min" }),
        ),
    ];
    sort_candidates(&mut profiles);
    let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["recTimed", "recNoTime", "recOther"]);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let mut profiles = vec![
        profile("recA", json!({ "stato_selezione": "Prospetto", "travel_time_tra_cap": "5 min" })),
        profile("recB", json!({ "stato_selezione": "Prospetto", "travel_time_tra_cap": "5 min" })),
    ];
    sort_candidates(&mut profiles);
    assert_eq!(profiles[0].id, "recA");
    assert_eq!(profiles[1].id, "recB");
}

#[test]
fn merge_flattens_duties_per_worker() {
    let mut profiles = vec![
        profile("recP1", json!({ "lavoratore_id": ["recW1"] })),
        profile("recP2", json!({ "lavoratore_id": ["recW2"] })),
        profile("recP3", json!({})),
    ];
    let entries = vec![
        ExperienceEntry {
            worker_id: "recW1".into(),
            duties: vec!["cucina".into()],
        },
        ExperienceEntry {
            worker_id: "recW1".into(),
            duties: vec!["pulizie".into(), "stiro".into()],
        },
    ];
    merge_duties(&mut profiles, &entries);
    assert_eq!(profiles[0].duties, vec!["cucina", "pulizie", "stiro"]);
    assert!(profiles[1].duties.is_empty());
    assert!(profiles[2].duties.is_empty());
}

#[test]
fn linkage_requires_exact_process_match() {
    let q = query("Anna", "recOpA", "P1", "recP1");
    let exact = profile(
        "recA",
        json!({ "processo_res": ["P1"], "recruiter_processo_res": ["Anna"] }),
    );
    let substring = profile(
        "recB",
        json!({ "processo_res": ["P12"], "recruiter_processo_res": ["Anna"] }),
    );
    let by_display_field = profile(
        "recC",
        json!({ "record_id_processo": "P1", "recruiter_processo_res": ["recOpA"] }),
    );
    assert!(matches_linkage(&exact, &q));
    assert!(!matches_linkage(&substring, &q));
    assert!(matches_linkage(&by_display_field, &q));
}

#[test]
fn linkage_requires_recruiter_name_or_id() {
    let q = query("Anna", "recOpA", "P1", "recP1");
    let other = profile(
        "recA",
        json!({ "processo_res": ["P1"], "recruiter_processo_res": ["Annalisa"] }),
    );
    assert!(!matches_linkage(&other, &q));
    assert!(matches_linkage(&other, &CandidateQuery::default()));
}
