use crate::api::RegistrationPayload;
use crate::content::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

/// 命令栏输入与后台任务共用的命令
///
/// `Load*` 由界面在挂载视图时发出，`OpenRegister` / `Quit` 只在界面侧处理。
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    LoadHome,
    LoadAbout,
    LoadAchievements { level: LevelFilter },
    LoadPosts { page: u32 },
    LoadArticle { slug: String },
    LoadAdmissions,
    OpenRegister,
    SubmitRegistration { payload: RegistrationPayload },
    Upload { kind: String, path: PathBuf },
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "Perintah: home | about | prestasi [level] | news [halaman] | post <slug> | ppdb | daftar | upload <jenis> <path> | help | quit";

/// 命令栏补全候选
pub const COMMAND_NAMES: [&str; 10] = [
    "home", "about", "prestasi", "news", "post", "ppdb", "daftar", "upload", "help", "quit",
];

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Unknown("".to_string()));
        }

        match parts[0] {
            "home" | "beranda" => Ok(AppCommand::LoadHome),
            "about" | "tentang" => Ok(AppCommand::LoadAbout),
            "prestasi" | "achievements" => Ok(AppCommand::LoadAchievements {
                level: parts
                    .get(1)
                    .map(|l| LevelFilter::new(l.to_ascii_lowercase()))
                    .unwrap_or_else(LevelFilter::all),
            }),
            "news" | "informasi" => match parts.get(1) {
                None => Ok(AppCommand::LoadPosts { page: 1 }),
                Some(raw) => match raw.parse::<u32>() {
                    Ok(page) if page > 0 => Ok(AppCommand::LoadPosts { page }),
                    _ => Ok(AppCommand::Unknown("Penggunaan: news [halaman]".to_string())),
                },
            },
            "post" => match parts.get(1) {
                Some(slug) => Ok(AppCommand::LoadArticle {
                    slug: slug.to_string(),
                }),
                None => Ok(AppCommand::Unknown("Penggunaan: post <slug>".to_string())),
            },
            "ppdb" => Ok(AppCommand::LoadAdmissions),
            "daftar" | "register" => Ok(AppCommand::OpenRegister),
            "upload" => {
                let path = parts[1..].iter().skip(1).copied().collect::<Vec<_>>().join(" ");
                match parts.get(1) {
                    Some(kind) if !path.is_empty() => Ok(AppCommand::Upload {
                        kind: kind.to_string(),
                        path: PathBuf::from(path),
                    }),
                    _ => Ok(AppCommand::Unknown(
                        "Penggunaan: upload <jenis> <path>".to_string(),
                    )),
                }
            }
            "help" | "h" => Ok(AppCommand::Help),
            "quit" | "q" | "exit" => Ok(AppCommand::Quit),
            _ => Ok(AppCommand::Unknown(format!("Perintah tidak dikenal: {}", parts[0]))),
        }
    }
}

/// 命令名前缀补全，返回需要追加的后缀
pub fn completion_hint(input: &str) -> Option<&'static str> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 1 || input.ends_with(' ') {
        return None;
    }
    COMMAND_NAMES
        .iter()
        .find(|c| c.starts_with(parts[0]) && **c != parts[0])
        .map(|c| &c[parts[0].len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> AppCommand {
        AppCommand::from_str(s).unwrap()
    }

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse("home"), AppCommand::LoadHome);
        assert_eq!(parse("ppdb"), AppCommand::LoadAdmissions);
        assert_eq!(parse("daftar"), AppCommand::OpenRegister);
        assert_eq!(parse("news"), AppCommand::LoadPosts { page: 1 });
        assert_eq!(parse("news 3"), AppCommand::LoadPosts { page: 3 });
        assert_eq!(
            parse("post hari-santri"),
            AppCommand::LoadArticle {
                slug: "hari-santri".to_string()
            }
        );
    }

    #[test]
    fn prestasi_level_is_optional() {
        assert_eq!(
            parse("prestasi"),
            AppCommand::LoadAchievements {
                level: LevelFilter::all()
            }
        );
        assert_eq!(
            parse("prestasi Nasional"),
            AppCommand::LoadAchievements {
                level: LevelFilter::new("nasional")
            }
        );
    }

    #[test]
    fn upload_keeps_spaces_in_path() {
        assert_eq!(
            parse("upload akta /tmp/akta lahir.pdf"),
            AppCommand::Upload {
                kind: "akta".to_string(),
                path: PathBuf::from("/tmp/akta lahir.pdf"),
            }
        );
        assert!(matches!(parse("upload akta"), AppCommand::Unknown(_)));
    }

    #[test]
    fn bad_input_becomes_unknown() {
        assert!(matches!(parse("news nol"), AppCommand::Unknown(_)));
        assert!(matches!(parse("post"), AppCommand::Unknown(_)));
        assert_eq!(
            parse("foo"),
            AppCommand::Unknown("Perintah tidak dikenal: foo".to_string())
        );
    }

    #[test]
    fn completes_command_prefix() {
        assert_eq!(completion_hint("pre"), Some("stasi"));
        assert_eq!(completion_hint("home"), None);
        assert_eq!(completion_hint("news 2"), None);
    }
}
