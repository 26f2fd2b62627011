#[cfg(test)]
mod tests {
    use foodtein_client::normalize::normalize;
    use foodtein_client::tabular::{load_rows, write_template};
    use foodtein_client::{ClientError, RecordKind};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_health_upload_end_to_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("health.csv");
        fs::write(
            &path,
            "Date,Metric,Value\n\
             02/09/2026,Steps,10200\n\
             02/09/2026,Blood Pressure,118/76\n\
             2026-02-10,Heart Rate (bpm),72\n\
             2026-02-10,Mood,great\n",
        )
        .unwrap();

        let rows = load_rows(&path, RecordKind::Health).unwrap();
        assert_eq!(rows.len(), 4);

        let records = normalize(&rows, RecordKind::Health);
        assert_eq!(records.len(), 2);
        let by_day: Vec<&str> = records.iter().map(|r| r.day()).collect();
        assert!(by_day.contains(&"2026-02-09"));
        assert!(by_day.contains(&"2026-02-10"));

        let feb_ninth = records
            .iter()
            .filter_map(|r| r.as_health())
            .find(|h| h.recorded_at == "2026-02-09T12:00:00Z")
            .unwrap();
        assert_eq!(feb_ninth.blood_pressure_sys, Some(118));
        assert_eq!(feb_ninth.blood_pressure_dia, Some(76));
    }

    #[test]
    fn test_dietary_template_normalizes_every_meal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dietary.csv");
        write_template(fs::File::create(&path).unwrap(), RecordKind::Dietary).unwrap();

        let rows = load_rows(&path, RecordKind::Dietary).unwrap();
        let records = normalize(&rows, RecordKind::Dietary);
        assert_eq!(records.len(), 8);
        let first = records[0].as_dietary().unwrap();
        assert_eq!(first.food_name, "Oatmeal with berries");
        assert_eq!(first.recorded_at, "2026-02-09T12:00:00Z");
        assert_eq!(first.carbohydrates, 35.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_rows(&dir.path().join("absent.csv"), RecordKind::Workout).unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[test]
    fn test_workout_csv_without_date_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.csv");
        fs::write(&path, "workout_name,category\nRun,cardio\n").unwrap();
        let err = load_rows(&path, RecordKind::Workout).unwrap_err();
        assert!(matches!(err, ClientError::MissingColumn(ref c) if c == "date"));
    }
}
