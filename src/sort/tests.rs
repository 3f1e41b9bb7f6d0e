use proptest::prelude::*;

use super::bucket::BucketSet;
use super::driver::{SortError, sort_records};
use super::key::{Direction, Keyed, SortKey, pad_key};
use crate::record::{Date, Field, Gender, Record};

fn rec(last: &str, first: &str, gender: Gender, date: (u16, u8, u8), color: &str) -> Record {
    Record {
        last_name: last.to_string(),
        first_name: first.to_string(),
        gender,
        date_of_birth: Date::new(date.0, date.1, date.2).unwrap(),
        favorite_color: color.to_string(),
    }
}

fn asc(field: Field) -> SortKey<Field> {
    SortKey::new(field, Direction::Ascending)
}

fn desc(field: Field) -> SortKey<Field> {
    SortKey::new(field, Direction::Descending)
}

fn last_names(records: &[Record], order: &[usize]) -> Vec<String> {
    order.iter().map(|&i| records[i].last_name.clone()).collect()
}

#[test]
fn test_single_key_ascending() {
    let records = vec![
        rec("Smith", "A", Gender::Unknown, (1990, 1, 1), ""),
        rec("Adams", "B", Gender::Unknown, (1990, 1, 1), ""),
        rec("Zane", "C", Gender::Unknown, (1990, 1, 1), ""),
    ];
    let order = sort_records(&records, &[asc(Field::LastName)]).unwrap();
    assert_eq!(last_names(&records, &order), vec!["Adams", "Smith", "Zane"]);
}

#[test]
fn test_two_keys_category_then_name() {
    let records = vec![
        rec("Zed", "x", Gender::Male, (1990, 1, 1), "B"),
        rec("Ann", "x", Gender::Male, (1990, 1, 1), "A"),
        rec("Ann", "x", Gender::Male, (1990, 1, 1), "B"),
    ];
    let spec = [asc(Field::FavoriteColor), asc(Field::LastName)];
    let order = sort_records(&records, &spec).unwrap();
    let out: Vec<(String, String)> = order
        .iter()
        .map(|&i| (records[i].favorite_color.clone(), records[i].last_name.clone()))
        .collect();
    assert_eq!(
        out,
        vec![
            ("A".to_string(), "Ann".to_string()),
            ("B".to_string(), "Ann".to_string()),
            ("B".to_string(), "Zed".to_string()),
        ]
    );
}

#[test]
fn test_descending_date_key() {
    let records = vec![
        rec("Old", "x", Gender::Unknown, (1999, 5, 5), ""),
        rec("New", "x", Gender::Unknown, (2020, 1, 1), ""),
    ];
    let order = sort_records(&records, &[desc(Field::DateOfBirth)]).unwrap();
    assert_eq!(last_names(&records, &order), vec!["New", "Old"]);
}

#[test]
fn test_empty_spec_is_rejected() {
    let records = vec![rec("Smith", "A", Gender::Unknown, (1990, 1, 1), "")];
    let spec: [SortKey<Field>; 0] = [];
    assert_eq!(sort_records(&records, &spec), Err(SortError::EmptySpec));
}

#[test]
fn test_empty_records_are_rejected() {
    let records: Vec<Record> = Vec::new();
    assert_eq!(
        sort_records(&records, &[asc(Field::LastName)]),
        Err(SortError::NoRecords)
    );
}

#[test]
fn test_length_preservation_with_duplicates() {
    let records = vec![
        rec("Smith", "A", Gender::Female, (1990, 1, 1), "Red"),
        rec("Smith", "A", Gender::Female, (1990, 1, 1), "Red"),
        rec("Adams", "B", Gender::Male, (1985, 6, 6), "Blue"),
    ];
    let order = sort_records(&records, &[asc(Field::LastName), asc(Field::Gender)]).unwrap();
    assert_eq!(order.len(), records.len());
}

#[test]
fn test_stability_on_full_key_ties() {
    // Records 0 and 2 tie on every key; input order must survive.
    let records = vec![
        rec("Smith", "Alice", Gender::Female, (1990, 1, 1), "Red"),
        rec("Adams", "Bob", Gender::Male, (1985, 6, 6), "Blue"),
        rec("Smith", "Alice", Gender::Female, (1990, 1, 1), "Green"),
    ];
    let order = sort_records(&records, &[asc(Field::LastName), asc(Field::FirstName)]).unwrap();
    assert_eq!(order, vec![1, 0, 2]);
}

#[test]
fn test_duplicate_key_across_parent_groups_stays_in_its_group() {
    // "Smith" occurs under both categories. The B-group Smith must sort
    // within the B group (after Adams), not merge into the frozen A-group
    // Smith bucket.
    let records = vec![
        rec("Smith", "x", Gender::Unknown, (1990, 1, 1), "A"),
        rec("Adams", "x", Gender::Unknown, (1990, 1, 1), "B"),
        rec("Smith", "x", Gender::Unknown, (1990, 1, 1), "B"),
    ];
    let spec = [asc(Field::FavoriteColor), asc(Field::LastName)];
    let order = sort_records(&records, &spec).unwrap();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn test_empty_rendered_key_is_ordinary() {
    // Missing favorite color sorts as the padded empty string: before any
    // printable key ascending, after descending. No special placement.
    let records = vec![
        rec("A", "x", Gender::Unknown, (1990, 1, 1), "Blue"),
        rec("B", "x", Gender::Unknown, (1990, 1, 1), ""),
    ];
    let up = sort_records(&records, &[asc(Field::FavoriteColor)]).unwrap();
    assert_eq!(up, vec![1, 0]);
    let down = sort_records(&records, &[desc(Field::FavoriteColor)]).unwrap();
    assert_eq!(down, vec![0, 1]);
}

#[test]
fn test_three_key_sort() {
    let records = vec![
        rec("Smith", "Bob", Gender::Male, (1990, 1, 1), "Red"),
        rec("Smith", "Ann", Gender::Male, (1990, 1, 1), "Red"),
        rec("Smith", "Ann", Gender::Female, (1990, 1, 1), "Red"),
        rec("Adams", "Zoe", Gender::Female, (1990, 1, 1), "Red"),
    ];
    let spec = [asc(Field::LastName), asc(Field::FirstName), asc(Field::Gender)];
    let order = sort_records(&records, &spec).unwrap();
    assert_eq!(order, vec![3, 2, 1, 0]);
}

#[test]
fn test_idempotence_under_respecification() {
    let records = vec![
        rec("Zane", "C", Gender::Male, (1970, 2, 2), "Red"),
        rec("Adams", "B", Gender::Female, (1990, 1, 1), "Blue"),
        rec("Smith", "A", Gender::Female, (1980, 3, 3), "Green"),
    ];
    let spec = [asc(Field::Gender), desc(Field::LastName)];
    let once = sort_records(&records, &spec).unwrap();
    let sorted: Vec<Record> = once.iter().map(|&i| records[i].clone()).collect();
    let twice = sort_records(&sorted, &spec).unwrap();
    assert_eq!(twice, (0..records.len()).collect::<Vec<_>>());
}

#[test]
fn test_bucket_set_freeze_boundary() {
    let mut set = BucketSet::new(Direction::Ascending);
    set.append_new("m".to_string(), 0);
    set.insert_ordered("a".to_string(), 1, 0);
    assert_eq!(set.len(), 2);

    // Freeze, then insert a key that would sort before the frozen region.
    let boundary = set.freeze_all();
    assert_eq!(boundary, 2);
    set.insert_ordered("a".to_string(), 2, boundary);

    let groups: Vec<Vec<usize>> = set.into_groups().collect();
    // Frozen [a],[m] stay put; the new "a" lands after the boundary.
    assert_eq!(groups, vec![vec![1], vec![0], vec![2]]);
}

#[test]
fn test_bucket_lookup_is_scoped_to_unfrozen_suffix() {
    let mut set = BucketSet::new(Direction::Ascending);
    set.append_new("a".to_string(), 0);
    let boundary = set.freeze_all();
    assert!(set.find_unfrozen_mut("a", boundary).is_none());

    set.append_new("a".to_string(), 1);
    assert!(set.find_unfrozen_mut("a", boundary).is_some());
}

#[test]
fn test_insert_ordered_descending() {
    let mut set = BucketSet::new(Direction::Descending);
    set.append_new("m".to_string(), 0);
    set.insert_ordered("z".to_string(), 1, 0);
    set.insert_ordered("a".to_string(), 2, 0);
    let keys: Vec<Vec<usize>> = set.into_groups().collect();
    assert_eq!(keys, vec![vec![1], vec![0], vec![2]]);
}

#[test]
fn test_direction_parse() {
    assert_eq!(Direction::parse("asc").unwrap(), Direction::Ascending);
    assert_eq!(Direction::parse("DESC").unwrap(), Direction::Descending);
    assert!(Direction::parse("sideways").is_err());
}

#[test]
fn test_pad_key() {
    assert_eq!(pad_key("ab").len(), 30);
    assert!(pad_key("ab").ends_with(' '));
    let long = "x".repeat(40);
    assert_eq!(pad_key(&long), long);
}

// ---------------------------------------------------------------------------
// Property tests: the engine must agree with a plain multi-key comparator
// stable sort on rendered key strings.

fn reference_sort(records: &[Record], spec: &[SortKey<Field>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        for key in spec {
            let ka = records[a].key_string(key.field);
            let kb = records[b].key_string(key.field);
            let ord = match key.direction {
                Direction::Ascending => ka.cmp(&kb),
                Direction::Descending => kb.cmp(&ka),
            };
            if ord != std::cmp::Ordering::Equal {
                return ord;
            }
        }
        std::cmp::Ordering::Equal
    });
    order
}

fn arb_record() -> impl Strategy<Value = Record> {
    let name = prop::sample::select(vec!["Adams", "Baker", "Cruz", "Diaz", "Ebert", "Smith"]);
    let first = prop::sample::select(vec!["Ann", "Bob", "Cam", "Dee"]);
    let gender = prop::sample::select(vec![Gender::Female, Gender::Male, Gender::Unknown]);
    let color = prop::sample::select(vec!["", "Red", "Blue", "Teal"]);
    (name, first, gender, 1970u16..2005, 1u8..13, 1u8..29, color).prop_map(
        |(last, first, gender, y, m, d, color)| {
            rec(last, first, gender, (y, m, d), color)
        },
    )
}

fn arb_spec() -> impl Strategy<Value = Vec<SortKey<Field>>> {
    let key = (
        prop::sample::select(vec![
            Field::LastName,
            Field::FirstName,
            Field::Gender,
            Field::DateOfBirth,
            Field::FavoriteColor,
        ]),
        prop::bool::ANY,
    )
        .prop_map(|(field, up)| {
            SortKey::new(
                field,
                if up {
                    Direction::Ascending
                } else {
                    Direction::Descending
                },
            )
        });
    prop::collection::vec(key, 1..4)
}

proptest! {
    #[test]
    fn prop_matches_reference_comparator_sort(
        records in prop::collection::vec(arb_record(), 1..40),
        spec in arb_spec(),
    ) {
        let order = sort_records(&records, &spec).unwrap();
        prop_assert_eq!(order, reference_sort(&records, &spec));
    }

    #[test]
    fn prop_length_preserved_and_is_permutation(
        records in prop::collection::vec(arb_record(), 1..40),
        spec in arb_spec(),
    ) {
        let order = sort_records(&records, &spec).unwrap();
        prop_assert_eq!(order.len(), records.len());
        let mut seen = order.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..records.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_direction_reversal_reverses_output(
        records in prop::collection::vec(arb_record(), 1..30),
        spec in arb_spec(),
    ) {
        // Exact-reverse symmetry only holds when no two records tie on the
        // full key tuple; drop ties first.
        let mut unique: Vec<Record> = Vec::new();
        'outer: for r in records {
            for u in &unique {
                if spec.iter().all(|k| u.key_string(k.field) == r.key_string(k.field)) {
                    continue 'outer;
                }
            }
            unique.push(r);
        }
        let flipped: Vec<SortKey<Field>> = spec
            .iter()
            .map(|k| {
                SortKey::new(
                    k.field,
                    match k.direction {
                        Direction::Ascending => Direction::Descending,
                        Direction::Descending => Direction::Ascending,
                    },
                )
            })
            .collect();

        let forward = sort_records(&unique, &spec).unwrap();
        let mut backward = sort_records(&unique, &flipped).unwrap();
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_idempotent_under_respecification(
        records in prop::collection::vec(arb_record(), 1..30),
        spec in arb_spec(),
    ) {
        let once = sort_records(&records, &spec).unwrap();
        let sorted: Vec<Record> = once.iter().map(|&i| records[i].clone()).collect();
        let twice = sort_records(&sorted, &spec).unwrap();
        prop_assert_eq!(twice, (0..sorted.len()).collect::<Vec<_>>());
    }
}
