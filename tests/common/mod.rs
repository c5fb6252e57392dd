#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// A stand-in for bsqldb: records its arguments, swallows the query and
/// prints canned output with `@SEP@` replaced by the separator found in the query.
pub struct FakeClient {
    pub script: PathBuf,
    pub args_file: PathBuf,
    pub query_file: PathBuf,
}

impl FakeClient {
    pub fn new(dir: &Path, canned_output: &str) -> Self {
        let canned = dir.join("canned.txt");
        std::fs::write(&canned, canned_output).unwrap();

        let body = format!(
            r#"query=$(cat)
printf '%s' "$query" > "{query}"
sep=$(printf '%s' "$query" | sed -n 's/.*"\(------[-0-9]*-----\)".*/\1/p')
sed "s/@SEP@/$sep/g" "{canned}"
"#,
            query = dir.join("query.txt").display(),
            canned = canned.display(),
        );
        Self::with_body(dir, &body)
    }

    pub fn failing(dir: &Path, stderr: &str, code: i32) -> Self {
        let body = format!("cat > /dev/null\necho '{}' >&2\nexit {}\n", stderr, code);
        Self::with_body(dir, &body)
    }

    fn with_body(dir: &Path, body: &str) -> Self {
        let script = dir.join("fake_bsqldb");
        let args_file = dir.join("args.txt");
        let contents = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"{}\"\n{}",
            args_file.display(),
            body
        );
        std::fs::write(&script, contents).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            script,
            query_file: dir.join("query.txt"),
            args_file,
        }
    }

    pub fn program(&self) -> String {
        self.script.to_str().unwrap().to_string()
    }

    pub fn recorded_args(&self) -> Vec<String> {
        std::fs::read_to_string(&self.args_file)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub const MEETINGS_OUTPUT: &str = "header\n2020-01-15 10:30:00\n4821\n<root><Title>Board meeting</Title><Agenda>Item <b>one</b></Agenda></root>\n@SEP@\n\
2020-02-01 08:00:00\n4822\n<root><Title>broken</root>\n@SEP@\n\
2020-03-09 18:15:00\n4823\n<root><Title>first</Title><Title>second</Title></root>\n@SEP@\n(3 rows affected)\n";

pub const POSTS_OUTPUT: &str = "header\n2020-01-15 10:30:00\n4821\n<root><Information>Body text</Information><Title></Title><Location>Room A</Location></root>\n@SEP@\n";
