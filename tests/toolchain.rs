//! Toolchain behavior against fake apktool/apksigner/zipalign scripts.

#![cfg(unix)]

mod common;

use std::path::Path;
use std::sync::Arc;

use apkchain::toolchain::{Error, Level, NullReporter, SettingsBuilder, Toolchain};
use common::{APKTOOL_WRITES_OUTPUT, Fixture, RecordingReporter, display};

fn toolchain(fixture: &Fixture, include_paths: bool) -> (Toolchain, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let settings = fixture
        .settings()
        .include_paths_in_messages(include_paths)
        .build()
        .unwrap();
    (Toolchain::new(settings, reporter.clone()), reporter)
}

// Construction

#[test]
fn construction_fails_when_tool_missing_from_search_path() {
    let fixture = Fixture::new();
    let empty = fixture.dir.path().join("empty");
    std::fs::create_dir_all(&empty).unwrap();

    let result = SettingsBuilder::new()
        .apksigner(fixture.tool("apksigner"))
        .zipalign(fixture.tool("zipalign"))
        .working_dir(&fixture.work)
        .search_path(empty.as_os_str())
        .build();

    match result {
        Err(Error::ToolNotFound { tool, .. }) => assert_eq!(tool, "apktool"),
        other => panic!("expected ToolNotFound, got {:?}", other),
    }
}

#[test]
fn construction_fails_when_explicit_tool_path_does_not_exist() {
    let fixture = Fixture::new();

    let result = fixture
        .settings()
        .zipalign(fixture.dir.path().join("nope/zipalign"))
        .build();

    match result {
        Err(Error::ToolNotFound { tool, .. }) => assert_eq!(tool, "zipalign"),
        other => panic!("expected ToolNotFound, got {:?}", other),
    }
}

#[test]
fn tools_are_found_on_search_path() {
    let fixture = Fixture::new();

    let settings = SettingsBuilder::new()
        .working_dir(&fixture.work)
        .search_path(fixture.bin.as_os_str())
        .build()
        .unwrap();

    assert!(settings.apktool().ends_with("bin/apktool"));
    assert!(settings.apksigner().ends_with("bin/apksigner"));
    assert!(settings.zipalign().ends_with("bin/zipalign"));
}

#[test]
fn relative_paths_and_defaults_resolve_against_working_dir() {
    let fixture = Fixture::new();
    std::fs::create_dir_all(fixture.path("tools")).unwrap();
    std::fs::copy(fixture.tool("apktool"), fixture.path("tools/apktool")).unwrap();

    let settings = SettingsBuilder::new()
        .apktool("tools/apktool")
        .apksigner(fixture.tool("apksigner"))
        .zipalign(fixture.tool("zipalign"))
        .working_dir(&fixture.work)
        .build()
        .unwrap();

    assert_eq!(settings.working_dir(), fixture.work.as_path());
    assert_eq!(settings.apktool(), fixture.path("tools/apktool"));
    assert_eq!(
        settings.keystore_path(),
        fixture.path("SignKey/debug.keystore")
    );
    assert_eq!(settings.keystore_alias(), "androiddebugkey");
    assert_eq!(settings.keystore_password(), "android");
    assert!(!settings.include_paths_in_messages());
}

#[test]
fn settings_debug_hides_password() {
    let fixture = Fixture::new();
    let settings = fixture
        .settings()
        .keystore_password("s3cr3t")
        .build()
        .unwrap();

    let debug = format!("{:?}", settings);
    assert!(!debug.contains("s3cr3t"));
}

// Decompile and the process primitive

#[tokio::test]
async fn decompile_invokes_apktool_with_absolute_path_and_force() {
    let fixture = Fixture::new();
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(toolchain.decompile("app.apk", None, true, false).await);

    assert_eq!(
        fixture.calls(),
        vec![format!("apktool d {} -f", display(&fixture.path("app.apk")))]
    );
    assert_eq!(
        reporter.lines(),
        vec![(Level::Success, "Successfully decompiled".to_string())]
    );
}

#[tokio::test]
async fn decompile_passes_output_dir_and_omits_force() {
    let fixture = Fixture::new();
    let (toolchain, _reporter) = toolchain(&fixture, false);

    assert!(
        toolchain
            .decompile("app.apk", Some(Path::new("out")), false, false)
            .await
    );

    assert_eq!(
        fixture.calls(),
        vec![format!(
            "apktool d {} -o {}",
            display(&fixture.path("app.apk")),
            display(&fixture.path("out"))
        )]
    );
}

#[tokio::test]
async fn empty_optional_arguments_are_treated_as_absent() {
    let fixture = Fixture::new();
    fixture.script("apktool", APKTOOL_WRITES_OUTPUT);
    fixture.create_keystore();
    let (toolchain, _reporter) = toolchain(&fixture, false);

    assert!(
        toolchain
            .decompile("app.apk", Some(Path::new("")), true, false)
            .await
    );
    assert!(
        toolchain
            .install_framework("fw.apk", Some(""), true, false)
            .await
    );
    assert!(toolchain.build("app", Some(Path::new("")), true, false).await);

    assert_eq!(
        fixture.calls_to("apktool"),
        vec![
            format!("apktool d {} -f", display(&fixture.path("app.apk"))),
            format!("apktool if {} -f", display(&fixture.path("fw.apk"))),
            format!(
                "apktool b {} -f -o {}",
                display(&fixture.path("app")),
                display(&fixture.path("app_Signed.apk"))
            ),
        ]
    );
}

#[tokio::test]
async fn decompile_failure_reports_exit_code() {
    let fixture = Fixture::new();
    fixture.script("apktool", "exit 1");
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(!toolchain.decompile("app.apk", None, true, false).await);

    assert_eq!(
        reporter.lines(),
        vec![(
            Level::Error,
            "Command failed with return code 1".to_string()
        )]
    );
}

#[tokio::test]
async fn detailed_messages_include_paths_when_enabled() {
    let fixture = Fixture::new();
    let (toolchain, reporter) = toolchain(&fixture, true);

    assert!(toolchain.decompile("app.apk", None, true, false).await);

    assert_eq!(
        reporter.messages(),
        vec![format!(
            "Successfully decompiled '{}'",
            display(&fixture.path("app.apk"))
        )]
    );
}

#[tokio::test]
async fn every_invocation_receives_one_newline_on_stdin() {
    let fixture = Fixture::new();
    let (toolchain, _reporter) = toolchain(&fixture, false);

    toolchain.decompile("app.apk", None, true, false).await;
    assert_eq!(fixture.stdin_of("apktool"), "\n");

    toolchain.decompile("app.apk", None, true, true).await;
    assert_eq!(fixture.stdin_of("apktool"), "\n\n");
}

#[tokio::test]
async fn tool_that_ignores_stdin_still_succeeds() {
    let fixture = Fixture::new();
    let dir = fixture.dir.path().join("raw");
    std::fs::create_dir_all(&dir).unwrap();
    let apktool = dir.join("apktool");
    std::fs::write(&apktool, "#!/bin/sh\nexit 0\n").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&apktool, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    let reporter = Arc::new(RecordingReporter::default());
    let settings = fixture.settings().apktool(&apktool).build().unwrap();
    let toolchain = Toolchain::new(settings, reporter.clone());

    assert!(toolchain.empty_framework_dir(false).await);
    assert!(reporter.contains(Level::Success, "Successfully emptied"));
}

#[tokio::test]
async fn show_log_relays_classified_lines_and_hides_prompt() {
    let fixture = Fixture::new();
    fixture.script(
        "apktool",
        r#"
echo "I: Using Apktool 2.9.3"
echo "W: Could not find sources"
echo "E: Broken resource" >&2
echo "  plain output  "
echo "Press any key to continue . . ."
exit 0
"#,
    );
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(toolchain.decompile("app.apk", None, true, true).await);

    let lines = reporter.lines();
    assert!(lines.contains(&(Level::Info, "I: Using Apktool 2.9.3".to_string())));
    assert!(lines.contains(&(Level::Warning, "W: Could not find sources".to_string())));
    assert!(lines.contains(&(Level::Error, "E: Broken resource".to_string())));
    assert!(lines.contains(&(Level::Plain, "plain output".to_string())));
    assert!(!reporter.messages().iter().any(|m| m.contains("Press any key")));
    assert_eq!(
        lines.last(),
        Some(&(Level::Success, "Successfully decompiled".to_string()))
    );
}

#[tokio::test]
async fn quiet_run_reports_only_final_status() {
    let fixture = Fixture::new();
    fixture.script("apktool", "echo 'I: noisy'\necho 'E: noisy' >&2\nexit 0");
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(toolchain.decompile("app.apk", None, true, false).await);

    assert_eq!(reporter.messages(), vec!["Successfully decompiled".to_string()]);
}

#[tokio::test]
async fn launch_failure_is_reported_not_raised() {
    let fixture = Fixture::new();
    let (toolchain, reporter) = toolchain(&fixture, false);
    std::fs::remove_file(fixture.tool("apktool")).unwrap();

    assert!(!toolchain.empty_framework_dir(false).await);

    assert_eq!(
        reporter.lines(),
        vec![(Level::Error, "Error during command execution".to_string())]
    );
}

// Framework operations

#[tokio::test]
async fn install_framework_passes_tag_and_force() {
    let fixture = Fixture::new();
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(
        toolchain
            .install_framework("framework-res.apk", Some("vendor"), true, false)
            .await
    );

    assert_eq!(
        fixture.calls(),
        vec![format!(
            "apktool if {} -f -t vendor",
            display(&fixture.path("framework-res.apk"))
        )]
    );
    assert_eq!(
        reporter.messages(),
        vec!["Successfully installed framework from".to_string()]
    );
}

#[tokio::test]
async fn empty_framework_dir_runs_subcommand() {
    let fixture = Fixture::new();
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(toolchain.empty_framework_dir(false).await);

    assert_eq!(fixture.calls(), vec!["apktool empty-framework-dir".to_string()]);
    assert_eq!(
        reporter.messages(),
        vec!["Successfully emptied the apktool framework directory".to_string()]
    );
}

// Build -> sign -> align

#[tokio::test]
async fn build_signs_and_aligns_explicit_output() {
    let fixture = Fixture::new();
    fixture.script("apktool", APKTOOL_WRITES_OUTPUT);
    let keystore = fixture.create_keystore();
    let (toolchain, reporter) = toolchain(&fixture, false);
    let output = fixture.path("app-patched.apk");

    assert!(toolchain.build("app", Some(Path::new("app-patched.apk")), true, false).await);

    let folder = fixture.path("app");
    let aligned = fixture.path("app-patched_aligned.apk");
    assert_eq!(
        fixture.calls(),
        vec![
            format!("apktool b {} -f -o {}", display(&folder), display(&output)),
            format!(
                "apksigner sign --ks {} --ks-key-alias androiddebugkey --ks-pass pass:android \
                 --key-pass pass:android --v4-signing-enabled false {}",
                display(&keystore),
                display(&output)
            ),
            format!("zipalign -v 4 {} {}", display(&output), display(&aligned)),
        ]
    );

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "aligned");
    assert!(!aligned.exists());
    assert_eq!(
        reporter.messages(),
        vec![
            "Successfully built".to_string(),
            "Successfully signed.".to_string(),
            "Successfully zipaligned.".to_string(),
        ]
    );
}

#[tokio::test]
async fn build_defaults_output_next_to_folder() {
    let fixture = Fixture::new();
    fixture.script("apktool", APKTOOL_WRITES_OUTPUT);
    fixture.create_keystore();
    let (toolchain, _reporter) = toolchain(&fixture, false);

    assert!(toolchain.build("app", None, true, false).await);

    let output = fixture.path("app_Signed.apk");
    assert_eq!(
        fixture.calls_to("apktool"),
        vec![format!(
            "apktool b {} -f -o {}",
            display(&fixture.path("app")),
            display(&output)
        )]
    );
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "aligned");
}

#[tokio::test]
async fn build_falls_back_to_dist_artifact() {
    let fixture = Fixture::new();
    fixture.create_keystore();
    let dist = fixture.path("app/dist");
    std::fs::create_dir_all(&dist).unwrap();
    let artifact = dist.join("app.apk");
    std::fs::write(&artifact, "built").unwrap();
    let (toolchain, _reporter) = toolchain(&fixture, false);

    assert!(toolchain.build("app", None, true, false).await);

    let signer_calls = fixture.calls_to("apksigner");
    assert_eq!(signer_calls.len(), 1);
    assert!(signer_calls[0].ends_with(&display(&artifact)));
    assert_eq!(std::fs::read_to_string(&artifact).unwrap(), "aligned");
}

#[tokio::test]
async fn build_without_artifact_halts_before_signing() {
    let fixture = Fixture::new();
    fixture.create_keystore();
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(!toolchain.build("app", None, true, false).await);

    assert!(fixture.calls_to("apksigner").is_empty());
    assert!(fixture.calls_to("zipalign").is_empty());
    assert!(reporter.contains(Level::Error, "No APK file found after build."));
}

#[tokio::test]
async fn failed_build_halts_chain() {
    let fixture = Fixture::new();
    fixture.script("apktool", "exit 2");
    fixture.create_keystore();
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(!toolchain.build("app", None, true, false).await);

    assert_eq!(fixture.calls().len(), 1);
    assert!(reporter.contains(Level::Error, "Command failed with return code 2"));
}

#[tokio::test]
async fn missing_keystore_skips_signer_and_aligner() {
    let fixture = Fixture::new();
    fixture.script("apktool", APKTOOL_WRITES_OUTPUT);
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(!toolchain.build("app", None, true, false).await);

    assert!(fixture.calls_to("apksigner").is_empty());
    assert!(fixture.calls_to("zipalign").is_empty());
    assert!(reporter.contains(Level::Error, "Keystore not found."));
    assert!(fixture.path("app_Signed.apk").exists());
}

#[tokio::test]
async fn sign_returns_false_for_missing_keystore() {
    let fixture = Fixture::new();
    let toolchain = Toolchain::new(fixture.settings().build().unwrap(), Arc::new(NullReporter));

    assert!(!toolchain.sign("app.apk").await);
    assert!(fixture.calls().is_empty());
}

#[tokio::test]
async fn signing_failure_skips_alignment() {
    let fixture = Fixture::new();
    fixture.script("apktool", APKTOOL_WRITES_OUTPUT);
    fixture.script("apksigner", "exit 1");
    fixture.create_keystore();
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(!toolchain.build("app", None, true, false).await);

    assert_eq!(fixture.calls_to("apksigner").len(), 1);
    assert!(fixture.calls_to("zipalign").is_empty());
    assert!(reporter.contains(Level::Error, "Failed to sign APK."));
}

#[tokio::test]
async fn alignment_failure_keeps_signed_artifact() {
    let fixture = Fixture::new();
    fixture.script("apktool", APKTOOL_WRITES_OUTPUT);
    fixture.script("zipalign", "exit 1");
    fixture.create_keystore();
    let (toolchain, reporter) = toolchain(&fixture, false);

    assert!(!toolchain.build("app", None, true, false).await);

    let output = fixture.path("app_Signed.apk");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "built");
    assert!(reporter.contains(Level::Success, "Successfully signed."));
    assert!(reporter.contains(Level::Error, "Failed to zipalign APK."));
}

#[tokio::test]
async fn custom_alias_and_password_reach_signer() {
    let fixture = Fixture::new();
    let keystore = fixture.path("release.keystore");
    std::fs::write(&keystore, "ks").unwrap();
    let settings = fixture
        .settings()
        .keystore("release.keystore")
        .keystore_alias("release")
        .keystore_password("hunter2")
        .build()
        .unwrap();
    let toolchain = Toolchain::new(settings, Arc::new(NullReporter));

    assert!(toolchain.sign(fixture.path("app.apk")).await);

    assert_eq!(
        fixture.calls_to("apksigner"),
        vec![format!(
            "apksigner sign --ks {} --ks-key-alias release --ks-pass pass:hunter2 \
             --key-pass pass:hunter2 --v4-signing-enabled false {}",
            display(&keystore),
            display(&fixture.path("app.apk"))
        )]
    );
}

#[tokio::test]
async fn short_messages_never_contain_paths() {
    let fixture = Fixture::new();
    fixture.script("apktool", APKTOOL_WRITES_OUTPUT);
    fixture.create_keystore();
    let (toolchain, reporter) = toolchain(&fixture, false);

    toolchain.decompile("app.apk", None, true, false).await;
    toolchain.build("app", None, true, false).await;
    toolchain
        .install_framework("framework-res.apk", None, true, false)
        .await;
    toolchain.sign("missing-dir/none.apk").await;

    let root = display(fixture.dir.path());
    for message in reporter.messages() {
        assert!(!message.contains(&root), "path leaked: {}", message);
        assert!(!message.contains('\''), "quote leaked: {}", message);
    }
}
