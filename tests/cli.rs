use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn summary_mode_prints_the_demo_scene() {
    let mut cmd = Command::cargo_bin("shading-lab").expect("binary exists");
    cmd.arg("--summary-only");
    cmd.assert()
        .success()
        .stdout(contains(
            "Scene: 9 spheres + 9 cylinders, showing Spheres, 1 active light(s)",
        ))
        .stdout(contains(
            " - sphere-1 stage=Gouraud texture=None ka=0.20 kd=0.10 ks=1.00 shininess=15",
        ))
        .stdout(contains(
            " - cylinder-9 stage=Gouraud texture=None ka=0.90 kd=0.50 ks=0.01 shininess=7",
        ));
}

#[test]
fn unknown_arguments_are_rejected() {
    let mut cmd = Command::cargo_bin("shading-lab").expect("binary exists");
    cmd.arg("--frobnicate");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --frobnicate"));
}

#[test]
fn texture_flag_requires_a_path() {
    let mut cmd = Command::cargo_bin("shading-lab").expect("binary exists");
    cmd.arg("--texture");
    cmd.assert()
        .failure()
        .stderr(contains("--texture requires a path"));
}

#[test]
fn missing_texture_file_is_a_fatal_error() {
    let mut cmd = Command::cargo_bin("shading-lab").expect("binary exists");
    cmd.args(["--texture", "does/not/exist.png"]);
    cmd.assert()
        .failure()
        .stderr(contains("failed to load texture"));
}
