use chrono::{DateTime, Duration, TimeZone, Utc};
use impact_vectors::impact::{
    multiplier, FieldValue, ImpactPipeline, ProjectRecord, SelectionError, VectorSelection,
    Weight, DEFAULT_TOTAL_BUDGET, MAX_WEIGHT, SCALE_CEILING,
};

const STARS: &str = "OSO: Total Stars";
const USERS: &str = "OSO: Total Onchain Users";
const FIRST_COMMIT: &str = "OSO: Date First Commit";

fn evaluation_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0)
        .single()
        .expect("valid evaluation instant")
}

fn selection(vector: &str, weight: f64) -> VectorSelection {
    VectorSelection::new(vector, Weight::new(weight).expect("valid weight"))
}

fn project(name: &str) -> ProjectRecord {
    ProjectRecord::new().with_field("Meta: Project Name", name)
}

fn total_allocation(allocated: &[impact_vectors::impact::AllocatedProject]) -> f64 {
    allocated.iter().map(|project| project.op_allocation).sum()
}

#[test]
fn two_projects_split_budget_one_to_five() {
    let records = vec![
        project("small").with_field(STARS, 10.0),
        project("large").with_field(STARS, 50.0),
    ];

    let allocated =
        ImpactPipeline::default().run(&records, &[selection(STARS, 100.0)], evaluation_instant());

    assert_eq!(allocated.len(), 2);
    assert_eq!(allocated[0].project.score, 2000.0);
    assert_eq!(allocated[1].project.score, 10000.0);
    assert!((allocated[0].op_allocation - 1_666_666.67).abs() < 0.01);
    assert!((allocated[1].op_allocation - 8_333_333.33).abs() < 0.01);
    assert!((total_allocation(&allocated) - DEFAULT_TOTAL_BUDGET).abs() < 1e-6);
}

#[test]
fn lone_project_without_value_yields_nothing() {
    let records = vec![project("empty")];

    let allocated =
        ImpactPipeline::default().run(&records, &[selection(STARS, 100.0)], evaluation_instant());

    assert!(allocated.is_empty());
}

#[test]
fn repeated_vector_is_counted_for_each_occurrence() {
    let records = vec![
        project("a").with_field(STARS, 25.0),
        project("b").with_field(STARS, 100.0),
    ];

    let once =
        ImpactPipeline::default().run(&records, &[selection(STARS, 100.0)], evaluation_instant());
    let twice = ImpactPipeline::default().run(
        &records,
        &[selection(STARS, 50.0), selection(STARS, 50.0)],
        evaluation_instant(),
    );

    assert_eq!(twice[0].project.data.len(), 2);
    assert_eq!(twice[0].project.score, once[0].project.score);
    assert_eq!(twice[1].project.score, 2.0 * 100.0 * 50.0);
}

#[test]
fn largest_observation_scales_to_ceiling_times_weight() {
    let records = vec![
        project("a").with_field(USERS, 320.0),
        project("b").with_field(USERS, 1280.0),
        project("c").with_field(USERS, FieldValue::from("640")),
    ];

    let factor = multiplier(&records, USERS, evaluation_instant());
    assert_eq!(1280.0 * factor, SCALE_CEILING);

    let allocated =
        ImpactPipeline::default().run(&records, &[selection(USERS, 7.0)], evaluation_instant());
    let top = allocated
        .iter()
        .map(|project| project.project.score)
        .fold(0.0_f64, f64::max);
    assert_eq!(top, SCALE_CEILING * 7.0);
}

#[test]
fn vectors_without_usable_values_contribute_nothing() {
    let records = vec![
        project("a").with_field(STARS, 40.0).with_field(USERS, "unknown"),
        project("b").with_field(STARS, 10.0),
    ];

    assert_eq!(multiplier(&records, USERS, evaluation_instant()), 0.0);

    let allocated = ImpactPipeline::default().run(
        &records,
        &[selection(STARS, 10.0), selection(USERS, 90.0)],
        evaluation_instant(),
    );

    assert_eq!(allocated.len(), 2);
    for entry in &allocated {
        let users = entry.project.contribution(USERS).expect("users entry present");
        assert_eq!(users.normalized, 0.0);
    }
}

#[test]
fn returned_projects_always_have_positive_scores() {
    let records = vec![
        project("zero").with_field(STARS, 0.0),
        project("negative").with_field(STARS, -12.0),
        project("missing"),
        project("positive").with_field(STARS, 3.0),
        project("zero weight only").with_field(USERS, 500.0),
    ];

    let allocated = ImpactPipeline::default().run(
        &records,
        &[selection(STARS, 20.0), selection(USERS, 0.0)],
        evaluation_instant(),
    );

    assert_eq!(allocated.len(), 1);
    assert!(allocated.iter().all(|project| project.project.score > 0.0));
    assert_eq!(
        allocated[0].project.metadata.display_name(),
        "positive".to_string()
    );
    assert!((allocated[0].op_allocation - DEFAULT_TOTAL_BUDGET).abs() < 1e-6);
}

#[test]
fn allocation_is_conserved_across_many_projects() {
    let records: Vec<ProjectRecord> = (1..=37)
        .map(|index| {
            project(&format!("project-{index}"))
                .with_field(STARS, f64::from(index * 13 % 29))
                .with_field(USERS, f64::from(index * 7 % 11))
        })
        .collect();

    let pipeline = ImpactPipeline::new(2_500_000.0);
    let allocated = pipeline.run(
        &records,
        &[selection(STARS, 35.0), selection(USERS, 65.0)],
        evaluation_instant(),
    );

    assert!(!allocated.is_empty());
    assert!((total_allocation(&allocated) - 2_500_000.0).abs() < 1e-4);
}

#[test]
fn largest_accepted_weight_keeps_allocations_finite() {
    let records = vec![
        project("small").with_field(STARS, 10.0),
        project("large").with_field(STARS, 50.0),
    ];

    assert!(matches!(
        VectorSelection::pair(&[STARS], &["1e307"]),
        Err(SelectionError::InvalidWeight { .. })
    ));

    let selections = VectorSelection::pair(&[STARS], &[MAX_WEIGHT]).expect("weight in range");
    let allocated = ImpactPipeline::default().run(&records, &selections, evaluation_instant());

    assert_eq!(allocated.len(), 2);
    for entry in &allocated {
        assert!(entry.project.score.is_finite());
        assert!(entry.op_allocation.is_finite());
    }
    assert!((total_allocation(&allocated) - DEFAULT_TOTAL_BUDGET).abs() < 1e-6);
    assert!((allocated[1].op_allocation - 8_333_333.33).abs() < 0.01);
}

#[test]
fn older_first_commit_scores_higher() {
    let records = vec![
        project("recent").with_field(FIRST_COMMIT, "2024-01-01"),
        project("veteran").with_field(FIRST_COMMIT, "2023-12-22T00:00:00Z"),
        project("undated"),
    ];

    let allocated = ImpactPipeline::new(300.0).run(
        &records,
        &[selection(FIRST_COMMIT, 1.0)],
        evaluation_instant(),
    );

    assert_eq!(allocated.len(), 2);
    assert!((allocated[0].project.score - 50.0).abs() < 1e-9);
    assert!((allocated[1].project.score - 100.0).abs() < 1e-9);
    assert!((allocated[0].op_allocation - 100.0).abs() < 1e-6);
    assert!((allocated[1].op_allocation - 200.0).abs() < 1e-6);
}

#[test]
fn runs_are_repeatable_for_a_fixed_instant() {
    let records = vec![
        project("a")
            .with_field(STARS, 12.0)
            .with_field(FIRST_COMMIT, "2022-07-01"),
        project("b")
            .with_field(STARS, 30.0)
            .with_field(FIRST_COMMIT, "2021-03-15"),
    ];
    let selections = [selection(STARS, 40.0), selection(FIRST_COMMIT, 60.0)];
    let pipeline = ImpactPipeline::default();

    let first = pipeline.run(&records, &selections, evaluation_instant());
    let second = pipeline.run(&records, &selections, evaluation_instant());
    assert_eq!(first, second);
}

#[test]
fn non_date_selections_ignore_the_evaluation_instant() {
    let records = vec![
        project("a").with_field(STARS, 12.0),
        project("b").with_field(STARS, 30.0),
    ];
    let selections = [selection(STARS, 40.0)];
    let pipeline = ImpactPipeline::default();

    let earlier = pipeline.run(&records, &selections, evaluation_instant());
    let later = pipeline.run(
        &records,
        &selections,
        evaluation_instant() + Duration::days(90),
    );
    assert_eq!(earlier, later);
}
