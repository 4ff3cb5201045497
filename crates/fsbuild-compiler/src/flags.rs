//! Compiler flags derived from one resolved configuration.

use std::path::Path;

use fsbuild_project::{BuildTarget, Configuration, DebugType, PlatformType};

/// Platform token for AnyCPU builds that prefer 32-bit execution.
pub const ANYCPU_32BIT_PREFERRED: &str = "anycpu32bitpreferred";

/// Flags for `configuration`, in the order the compiler expects them.
///
/// `output_file_name` is joined onto the configured output directory to
/// form `--out:`. Every unset field takes its documented default.
pub fn compiler_flags(
    target: &BuildTarget,
    output_file_name: &str,
    configuration: &Configuration,
) -> Vec<String> {
    let mut flags = Vec::new();

    flags.push(switch("--tailcalls", configuration.tailcalls));
    flags.push(switch("--warnaserror", configuration.warnings_as_errors));

    flags.extend(configuration.constants.iter().map(|c| format!("-d:{c}")));

    flags.push(debug_flag(configuration).to_string());
    flags.push(switch("--optimize", configuration.optimize));
    flags.push(format!("--platform:{}", platform_token(target.platform_type, configuration)));
    flags.push(format!("--warn:{}", configuration.warning_level()));

    let output_path = configuration.output_directory().join(output_file_name);
    flags.push(format!("--out:{}", output_path.display()));
    flags.push(format!(
        "--doc:{}",
        configuration.documentation_path(Path::new(&output_path)).display()
    ));

    if !configuration.no_warn.is_empty() {
        let codes: Vec<String> = configuration.no_warn.iter().map(u32::to_string).collect();
        flags.push(format!("--nowarn:{}", codes.join(",")));
    }

    flags.extend(configuration.other_flags.iter().cloned());
    flags
}

/// `<name>+` when explicitly enabled, `<name>-` otherwise.
fn switch(name: &str, enabled: Option<bool>) -> String {
    if enabled == Some(true) {
        format!("{name}+")
    } else {
        format!("{name}-")
    }
}

/// `debug-symbols = true` wins over `debug-type`.
fn debug_flag(configuration: &Configuration) -> &'static str {
    if configuration.debug_symbols == Some(true) {
        return "--debug:full";
    }
    match configuration.debug_type {
        Some(DebugType::Full) => "--debug:full",
        Some(DebugType::PdbOnly) => "--debug:pdbonly",
        Some(DebugType::None) | None => "--debug-",
    }
}

fn platform_token(platform: PlatformType, configuration: &Configuration) -> &'static str {
    if platform == PlatformType::AnyCpu && configuration.prefer_32bit == Some(true) {
        ANYCPU_32BIT_PREFERRED
    } else {
        platform.compiler_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn anycpu() -> BuildTarget {
        "v4.5|AnyCPU".parse().unwrap()
    }

    fn flag_with_prefix<'a>(flags: &'a [String], prefix: &str) -> Vec<&'a str> {
        flags
            .iter()
            .filter(|f| f.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn defaults() {
        let flags = compiler_flags(&anycpu(), "App.exe", &Configuration::default());
        let out = PathBuf::from("bin").join("App.exe");
        assert_eq!(
            flags,
            vec![
                "--tailcalls-".to_string(),
                "--warnaserror-".to_string(),
                "--debug-".to_string(),
                "--optimize-".to_string(),
                "--platform:anycpu".to_string(),
                "--warn:3".to_string(),
                format!("--out:{}", out.display()),
                format!("--doc:{}.xml", out.display()),
            ]
        );
    }

    #[test]
    fn explicit_switches() {
        let config = Configuration {
            tailcalls: Some(true),
            warnings_as_errors: Some(true),
            optimize: Some(true),
            ..Default::default()
        };
        let flags = compiler_flags(&anycpu(), "App.exe", &config);
        assert_eq!(&flags[..2], &["--tailcalls+", "--warnaserror+"]);
        assert!(flags.contains(&"--optimize+".to_string()));

        let config = Configuration {
            tailcalls: Some(false),
            optimize: Some(false),
            ..Default::default()
        };
        let flags = compiler_flags(&anycpu(), "App.exe", &config);
        assert_eq!(flags[0], "--tailcalls-");
        assert!(flags.contains(&"--optimize-".to_string()));
    }

    #[test]
    fn constants_follow_switches_in_declaration_order() {
        let config = Configuration {
            constants: vec!["DEBUG".into(), "TRACE".into()],
            ..Default::default()
        };
        let flags = compiler_flags(&anycpu(), "App.exe", &config);
        assert_eq!(&flags[2..4], &["-d:DEBUG", "-d:TRACE"]);
        assert_eq!(flags[4], "--debug-");
    }

    #[test]
    fn debug_symbols_take_precedence_over_debug_type() {
        for debug_type in [None, Some(DebugType::None), Some(DebugType::Full), Some(DebugType::PdbOnly)] {
            let config = Configuration {
                debug_symbols: Some(true),
                debug_type,
                ..Default::default()
            };
            let flags = compiler_flags(&anycpu(), "App.exe", &config);
            assert_eq!(flag_with_prefix(&flags, "--debug"), vec!["--debug:full"]);
        }
    }

    #[test]
    fn debug_type_mapping() {
        let cases = [
            (DebugType::None, "--debug-"),
            (DebugType::Full, "--debug:full"),
            (DebugType::PdbOnly, "--debug:pdbonly"),
        ];
        for (debug_type, expected) in cases {
            let config = Configuration {
                debug_symbols: Some(false),
                debug_type: Some(debug_type),
                ..Default::default()
            };
            let flags = compiler_flags(&anycpu(), "App.exe", &config);
            assert_eq!(flag_with_prefix(&flags, "--debug"), vec![expected]);
        }
    }

    #[test]
    fn prefer_32bit_only_applies_to_anycpu() {
        let prefer = Configuration {
            prefer_32bit: Some(true),
            ..Default::default()
        };
        let flags = compiler_flags(&anycpu(), "App.exe", &prefer);
        assert_eq!(
            flag_with_prefix(&flags, "--platform"),
            vec!["--platform:anycpu32bitpreferred"]
        );

        let x64: BuildTarget = "v4.5|x64".parse().unwrap();
        let flags = compiler_flags(&x64, "App.exe", &prefer);
        assert_eq!(flag_with_prefix(&flags, "--platform"), vec!["--platform:x64"]);

        let x86: BuildTarget = "v4.5|x86".parse().unwrap();
        let flags = compiler_flags(&x86, "App.exe", &Configuration::default());
        assert_eq!(flag_with_prefix(&flags, "--platform"), vec!["--platform:x86"]);
    }

    #[test]
    fn configured_paths() {
        let config = Configuration {
            warning_level: Some(5),
            output_path: Some(PathBuf::from("build")),
            documentation_file: Some(PathBuf::from("docs/Lib.xml")),
            ..Default::default()
        };
        let flags = compiler_flags(&anycpu(), "Lib.dll", &config);
        assert!(flags.contains(&"--warn:5".to_string()));
        assert!(flags.contains(&format!("--out:{}", PathBuf::from("build").join("Lib.dll").display())));
        assert!(flags.contains(&format!("--doc:{}", PathBuf::from("docs/Lib.xml").display())));
    }

    #[test]
    fn nowarn_and_other_flags_come_last() {
        let config = Configuration {
            no_warn: vec![40, 1182],
            other_flags: vec!["--crossoptimize+".into(), "--standalone".into()],
            ..Default::default()
        };
        let flags = compiler_flags(&anycpu(), "App.exe", &config);
        let n = flags.len();
        assert_eq!(&flags[n - 3..], &["--nowarn:40,1182", "--crossoptimize+", "--standalone"]);
    }

    #[test]
    fn empty_lists_emit_nothing() {
        let flags = compiler_flags(&anycpu(), "App.exe", &Configuration::default());
        assert!(flag_with_prefix(&flags, "--nowarn").is_empty());
        assert!(flag_with_prefix(&flags, "-d:").is_empty());
    }
}
