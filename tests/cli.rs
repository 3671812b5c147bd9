use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn write_draw(xml: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp draw");
    tmp.write_all(xml.as_bytes()).expect("write draw");
    tmp
}

#[test]
fn cli_prints_plain_uniforms_in_order() {
    let draw = write_draw(
        r#"<draw>
  <opacity>0.8</opacity>
  <vertical-gradient>1</vertical-gradient>
  <zoom>12</zoom>
  <bearing>90</bearing>
  <light>
    <color>255 255 255</color>
    <intensity>0.5</intensity>
    <anchor>map</anchor>
    <cartesian>1 0 0</cartesian>
  </light>
</draw>
"#,
    );
    let mut cmd = Command::cargo_bin("fill-extrusion-uniforms").expect("binary exists");
    cmd.arg(draw.path());
    cmd.assert()
        .success()
        .stdout(contains("Program fill_extrusion (6 uniforms, 128-byte block)"))
        .stdout(contains(" - opacity = 0.8000"))
        .stdout(contains(" - lightcolor = (1.0000, 1.0000, 1.0000)"))
        .stdout(contains(" - lightpos = (1.0000, 0.0000, 0.0000)"))
        .stdout(contains(" - lightintensity = 0.5000"))
        .stdout(contains(" - vertical_gradient = 1.0000"));
}

#[test]
fn cli_emits_pattern_uniforms_as_json() {
    let draw = write_draw(
        r#"<draw>
  <variant>pattern</variant>
  <zoom>4</zoom>
  <tile>4 3 2 0</tile>
  <atlas>512 256</atlas>
  <crossfade>2 1 0.5</crossfade>
</draw>
"#,
    );
    let mut cmd = Command::cargo_bin("fill-extrusion-uniforms").expect("binary exists");
    cmd.arg(draw.path()).arg("--json");
    cmd.assert()
        .success()
        .stdout(contains(r#""program": "fill_extrusion_pattern""#))
        .stdout(contains(r#""name": "pixel_coord_lower""#))
        .stdout(contains("1536.0"))
        .stdout(contains("1024.0"));
}

#[test]
fn cli_reports_invalid_draws() {
    let draw = write_draw("<draw><opacity>1</opacity></draw>");
    let mut cmd = Command::cargo_bin("fill-extrusion-uniforms").expect("binary exists");
    cmd.arg(draw.path());
    cmd.assert()
        .failure()
        .stderr(contains("failed to parse draw description"))
        .stderr(contains("<zoom> tag is missing"));
}
