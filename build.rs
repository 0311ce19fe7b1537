use semver::Version;

fn main() {
    println!("cargo::rerun-if-changed=build.rs");

    // netcdf-sys reports every version up to and including the one it found,
    // each as a quoted string: `DEP_NETCDF_VERSION_"4.9.2"`
    let linked = std::env::vars()
        .filter_map(|(env, _value)| {
            env.strip_prefix("DEP_NETCDF_VERSION_")
                .and_then(|v| Version::parse(v.trim_matches('"')).ok())
        })
        .max();

    match linked {
        Some(version) => println!("cargo::rustc-env=NETCDF_SMOKE_LINKED_VERSION={version}"),
        None => println!("cargo::rustc-env=NETCDF_SMOKE_LINKED_VERSION=unknown"),
    }
}
