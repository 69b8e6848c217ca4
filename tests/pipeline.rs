// End-to-end runs of the matching pipeline over small hand-built populations.

use matching_lib::{CorralConfig, Herd, Profile, Record};

fn profile(forename: &str, current_surname: &str) -> Profile {
    Profile {
        forename: forename.to_string(),
        current_surname: current_surname.to_string(),
        ..Profile::default()
    }
}

fn corralled(profiles: Vec<Profile>) -> Herd {
    let records = profiles
        .into_iter()
        .map(Record::from_profile)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut herd = Herd::new();
    herd.populate(records).unwrap();
    herd.corral(&CorralConfig::default()).unwrap();
    herd
}

#[test]
fn misspelled_duplicate_outscores_a_different_person() {
    let mut original = profile("Adelyn", "Bartell");
    original.birth_year = "1987".to_string();
    original.birth_month = "03".to_string();
    original.birth_day = "14".to_string();
    original.address1 = "448 Jones Street".to_string();
    original.postal_code = "47351".to_string();
    original.sex = "F".to_string();

    // same person, two transcription errors
    let mut duplicate = original.clone();
    duplicate.forename = "Adelynn".to_string();
    duplicate.birth_day = "41".to_string();

    // different person landing in the same block
    let mut stranger = profile("Abigail", "Bartell");
    stranger.birth_year = "1954".to_string();
    stranger.birth_month = "11".to_string();
    stranger.birth_day = "02".to_string();
    stranger.address1 = "9 Cedar Court".to_string();
    stranger.postal_code = "90210".to_string();
    stranger.sex = "F".to_string();

    let herd = corralled(vec![original, duplicate, stranger]);

    let dup_score = herd.similarity(0, 1).unwrap();
    let stranger_score = herd.similarity(0, 2).unwrap();
    assert!(dup_score > 0.8, "duplicate scored {dup_score}");
    assert!(
        dup_score > stranger_score,
        "duplicate {dup_score} should outscore stranger {stranger_score}"
    );
}

#[test]
fn sex_disagreement_drags_the_score_down() {
    let mut a = profile("Oliver", "Nader");
    a.sex = "M".to_string();
    let mut b = profile("Oliver", "Nader");
    b.sex = "M".to_string();
    let mut c = profile("Oliver", "Nader");
    c.sex = "F".to_string();

    let herd = corralled(vec![a, b, c]);
    let agreeing = herd.similarity(0, 1).unwrap();
    let disagreeing = herd.similarity(0, 2).unwrap();
    assert_eq!(agreeing, 1.0);
    assert!(disagreeing < agreeing);
}

#[test]
fn records_outside_every_shared_block_stay_unscored() {
    let herd = corralled(vec![
        profile("Adelyn", "Bartell"),
        profile("Oliver", "Nader"),
        profile("Zoe", "Kowalczyk"),
    ]);
    for first in 0..3 {
        for second in 0..3 {
            if first == second {
                assert_eq!(herd.similarity(first, second), Some(1.0));
            } else {
                assert_eq!(herd.similarity(first, second), None);
            }
        }
    }
}

#[test]
fn maiden_name_bridges_a_surname_change() {
    let mut before = profile("Charlotte", "Gerlach");
    before.sex = "F".to_string();
    let mut after = profile("Charlotte", "Heidenreich");
    after.birth_surname = "Gerlach".to_string();
    after.sex = "F".to_string();

    let herd = corralled(vec![before, after]);
    // the birth surname keeps the pair in a shared block and scoring high
    let score = herd
        .similarity(0, 1)
        .expect("birth surname should preserve a shared block");
    assert!(score > 0.5, "scored {score}");
}
