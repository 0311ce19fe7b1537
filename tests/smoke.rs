use netcdf_smoke::error::Error;
use netcdf_smoke::smoke::{self, Check, VariableSummary};
use netcdf_smoke::types::BasicType;
use netcdf_smoke::Format;

#[test]
fn run_creates_simple_nc() {
    let d = tempfile::tempdir().unwrap();

    let path = smoke::run_in(d.path()).unwrap();
    assert_eq!(path, d.path().join(smoke::FILE_NAME));
    assert!(path.exists());

    let summary = smoke::inspect(&path).unwrap();
    assert_eq!(summary.format, Format::Classic);
    assert_eq!(summary.title, None);
    assert_eq!(
        summary.variables,
        vec![VariableSummary {
            name: "data".to_string(),
            vartype: Some(BasicType::Int),
            dimensions: vec![],
            units: None,
        }]
    );
    assert!(summary.is_smoke_output());
    assert!(!summary.is_netcdf4_output());
}

#[test]
fn rerun_overwrites() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join(smoke::FILE_NAME);
    {
        let mut file = netcdf_smoke::create(&path).unwrap();
        file.add_variable("data", &[], BasicType::Int).unwrap();
        file.add_variable("other", &[], BasicType::Double).unwrap();
    }
    assert!(!smoke::inspect(&path).unwrap().is_smoke_output());

    smoke::run_in(d.path()).unwrap();
    assert!(smoke::inspect(&path).unwrap().is_smoke_output());
    smoke::run_in(d.path()).unwrap();
    assert!(smoke::inspect(&path).unwrap().is_smoke_output());
}

#[test]
fn missing_directory_is_a_library_error() {
    let d = tempfile::tempdir().unwrap();
    let dir = d.path().join("does").join("not").join("exist");

    let err = smoke::run_in(&dir).unwrap_err();
    assert!(matches!(err, Error::Netcdf(_)));
    assert_ne!(err.code(), Some(netcdf_sys::NC_NOERR));
    assert!(!err.to_string().is_empty());
    assert!(!dir.join(smoke::FILE_NAME).exists());
}

#[test]
fn directory_in_the_way() {
    let d = tempfile::tempdir().unwrap();
    std::fs::create_dir(d.path().join(smoke::FILE_NAME)).unwrap();

    let err = smoke::run_in(d.path()).unwrap_err();
    assert!(matches!(err, Error::Netcdf(_)));
}

#[test]
fn inspect_missing_file() {
    let d = tempfile::tempdir().unwrap();
    let err = smoke::inspect(d.path().join("blah_stuff.nc")).unwrap_err();
    assert!(matches!(err, Error::Netcdf(2)));
}

#[test]
fn netcdf4_check_writes_data_and_attributes() {
    let d = tempfile::tempdir().unwrap();

    let path = smoke::run_netcdf4_in(d.path()).unwrap();
    assert_eq!(path, d.path().join("test.nc"));

    let summary = smoke::inspect(&path).unwrap();
    assert_eq!(summary.format, Format::Netcdf4);
    assert_eq!(summary.title.as_deref(), Some("My test file"));
    assert_eq!(
        summary.variables,
        vec![VariableSummary {
            name: "data".to_string(),
            vartype: Some(BasicType::Int),
            dimensions: vec![("x".to_string(), 10), ("y".to_string(), 5)],
            units: Some("unknown".to_string()),
        }]
    );
    assert!(summary.is_netcdf4_output());
    assert!(!summary.is_smoke_output());

    let file = netcdf_smoke::open(&path).unwrap();
    let var = file.variable("data").unwrap().unwrap();
    let values = var.values::<i32>().unwrap();
    assert_eq!(values, (0..50).collect::<Vec<i32>>());
    // Row major: data[1][0] follows the five values of data[0][..]
    assert_eq!(values[5], 5);
}

#[test]
fn checks_name_their_files() {
    let d = tempfile::tempdir().unwrap();
    for check in [Check::Classic, Check::Netcdf4] {
        let path = check.run_in(d.path()).unwrap();
        assert_eq!(path, d.path().join(check.file_name()));
        assert!(check.success_message().ends_with(check.file_name()));
    }
    assert_eq!(Check::default(), Check::Classic);
}
