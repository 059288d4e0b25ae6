//! unified diff에서 새로 추가/수정된 라인 번호를 읽는 파서.
//!
//! diff를 계산하지 않고, 이미 계산된 diff 텍스트의 헝크 정보만 해석한다.

use std::collections::BTreeSet;

use crate::domain::changeset::ChangeRecord;

/// 진행 중인 헝크의 남은 라인 수와 다음 새 라인 번호.
#[derive(Debug, Clone, Copy)]
struct Hunk {
    next_line: usize,
    old_left: usize,
    new_left: usize,
}

impl Hunk {
    fn is_done(&self) -> bool {
        self.old_left == 0 && self.new_left == 0
    }

    /// 헝크 본문 한 줄을 소비하고, 추가된 라인이면 그 번호를 돌려준다.
    fn consume(&mut self, line: &str) -> Option<usize> {
        match line.as_bytes().first() {
            Some(b'+') => {
                let added = self.next_line;
                self.next_line += 1;
                self.new_left = self.new_left.saturating_sub(1);
                Some(added)
            }
            Some(b'-') => {
                self.old_left = self.old_left.saturating_sub(1);
                None
            }
            Some(b'\\') => None,
            _ => {
                self.next_line += 1;
                self.new_left = self.new_left.saturating_sub(1);
                self.old_left = self.old_left.saturating_sub(1);
                None
            }
        }
    }
}

/// 파일 하나의 patch(헝크 목록)에서 추가된 라인 번호를 구한다.
pub fn added_lines(patch: &str) -> BTreeSet<usize> {
    let mut lines = BTreeSet::new();
    let mut hunk: Option<Hunk> = None;

    for line in patch.lines() {
        if let Some(current) = hunk.as_mut() {
            if let Some(added) = current.consume(line) {
                lines.insert(added);
            }
            if current.is_done() {
                hunk = None;
            }
            continue;
        }
        if let Some(next) = parse_hunk_header(line) {
            hunk = (!next.is_done()).then_some(next);
        }
    }

    lines
}

/// 여러 파일이 담긴 unified diff를 파일별 변경 기록으로 변환한다.
/// 삭제된 파일은 제외하고, 헝크 없는 이름 변경은 빈 라인 집합으로 남긴다.
pub fn parse_unified_diff(diff: &str) -> Vec<ChangeRecord> {
    let mut records: Vec<ChangeRecord> = Vec::new();
    let mut current: Option<ChangeRecord> = None;
    let mut hunk: Option<Hunk> = None;

    for line in diff.lines() {
        if let Some(active) = hunk.as_mut() {
            if let Some(added) = active.consume(line) {
                if let Some(record) = current.as_mut() {
                    record.modified_lines.insert(added);
                }
            }
            if active.is_done() {
                hunk = None;
            }
            continue;
        }

        if line.starts_with("diff --git ") {
            records.extend(current.take());
        } else if let Some(path) = line.strip_prefix("rename to ") {
            current = Some(ChangeRecord::new(unquote_path(path), std::iter::empty()));
        } else if let Some(path) = line.strip_prefix("+++ ") {
            current = new_side_path(path).map(|path| ChangeRecord::new(path, std::iter::empty()));
        } else if let Some(next) = parse_hunk_header(line) {
            hunk = (!next.is_done()).then_some(next);
        }
    }
    records.extend(current);

    records
}

fn new_side_path(raw: &str) -> Option<String> {
    // `+++ b/path\t<timestamp>` 형식도 허용한다. 따옴표 안의 탭은 `\t`로 이스케이프된다.
    let path = raw.split('\t').next().unwrap_or(raw).trim();
    if path == "/dev/null" {
        return None;
    }
    let path = unquote_path(path);
    if let Some(rest) = path.strip_prefix("b/") {
        return Some(rest.to_string());
    }
    Some(path)
}

/// git이 C 스타일로 감싼 경로(`"b/\354\225\210.md"`)를 원래 UTF-8 경로로 되돌린다.
/// 따옴표로 감싸지 않은 경로는 그대로 돌려준다.
fn unquote_path(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) else {
        return raw.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();
    while let Some(byte) = iter.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        match iter.next() {
            Some(digit @ b'0'..=b'7') => {
                // 최대 세 자리 8진수 = 바이트 하나
                let mut value = u16::from(digit - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value * 8 + u16::from(next - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b't') => bytes.push(b'\t'),
            Some(b'n') => bytes.push(b'\n'),
            Some(b'v') => bytes.push(0x0b),
            Some(b'f') => bytes.push(0x0c),
            Some(b'r') => bytes.push(b'\r'),
            Some(other @ (b'"' | b'\\')) => bytes.push(other),
            Some(other) => bytes.extend([b'\\', other]),
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// `@@ -a[,b] +c[,d] @@` 헤더를 해석한다.
fn parse_hunk_header(line: &str) -> Option<Hunk> {
    let rest = line.strip_prefix("@@ ")?;
    let ranges = &rest[..rest.find(" @@")?];
    let mut parts = ranges.split_whitespace();
    let (_, old_count) = parse_range(parts.next()?.strip_prefix('-')?)?;
    let (new_start, new_count) = parse_range(parts.next()?.strip_prefix('+')?)?;

    Some(Hunk {
        next_line: new_start,
        old_left: old_count,
        new_left: new_count,
    })
}

fn parse_range(raw: &str) -> Option<(usize, usize)> {
    match raw.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((raw.parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "\
diff --git a/docs/guide.md b/docs/guide.md
index 3b18e51..a9c5d2e 100644
--- a/docs/guide.md
+++ b/docs/guide.md
@@ -2,0 +3,2 @@ Intro
+New sentence.
+Another one.
@@ -10 +12 @@ Section
-Old wording.
+New wording.
diff --git a/old.md b/old.md
deleted file mode 100644
index e69de29..0000000
--- a/old.md
+++ /dev/null
@@ -1,2 +0,0 @@
-gone
-also gone
diff --git a/a.md b/b.md
similarity index 100%
rename from a.md
rename to b.md
diff --git a/README.md b/README.md
--- a/README.md
+++ b/README.md
@@ -1,3 +1,3 @@
 # Title
-teh typo
+the typo
 end
";

    #[test]
    fn parses_multi_file_diff() {
        let records = parse_unified_diff(DIFF);
        let summary: Vec<(String, Vec<usize>)> = records
            .into_iter()
            .map(|r| (r.path, r.modified_lines.into_iter().collect()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("docs/guide.md".to_string(), vec![3, 4, 12]),
                ("b.md".to_string(), vec![]),
                ("README.md".to_string(), vec![2]),
            ]
        );
    }

    #[test]
    fn added_lines_from_single_patch() {
        let patch = "@@ -1,4 +1,5 @@\n # Title\n-Old\n+New\n+Extra\n context\n context\n";
        assert_eq!(added_lines(patch).into_iter().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn added_line_that_looks_like_header_is_counted() {
        let patch = "@@ -0,0 +1,2 @@\n+++ not a header\n+--- nor this\n";
        assert_eq!(added_lines(patch).into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn quoted_paths_are_decoded() {
        let diff = "\
diff --git \"a/\\354\\225\\210\\353\\202\\264.md\" \"b/\\354\\225\\210\\353\\202\\264.md\"
--- \"a/\\354\\225\\210\\353\\202\\264.md\"
+++ \"b/\\354\\225\\210\\353\\202\\264.md\"
@@ -1 +1 @@
-old
+new
diff --git a/x.md \"b/say \\\"hi\\\".md\"
similarity index 100%
rename from x.md
rename to \"say \\\"hi\\\".md\"
";
        let paths: Vec<String> = parse_unified_diff(diff)
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["안내.md".to_string(), "say \"hi\".md".to_string()]);
    }

    #[test]
    fn unquote_keeps_plain_paths() {
        assert_eq!(unquote_path("docs/a.md"), "docs/a.md");
        assert_eq!(unquote_path(r#""tab\there.md""#), "tab\there.md");
    }

    #[test]
    fn hunk_header_without_counts() {
        let hunk = parse_hunk_header("@@ -7 +9 @@").unwrap();
        assert_eq!((hunk.next_line, hunk.old_left, hunk.new_left), (9, 1, 1));
        assert!(parse_hunk_header("@@ broken").is_none());
    }
}
