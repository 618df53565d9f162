//! 以字符串存储的枚举
//!
//! 数据库中角色、状态等字段都以小写字符串保存，此宏统一生成
//! serde 映射、`Display` 与 `FromStr`，避免各处手写 match。

/// 定义字符串枚举
///
/// ```rust,ignore
/// define_string_enum! {
///     /// 学期
///     Periode {
///         Ganjil => "ganjil",
///         Genap => "genap",
///     }
/// }
/// ```
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $value:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

pub(crate) use define_string_enum;

#[cfg(test)]
mod tests {
    define_string_enum! {
        Warna {
            Merah => "merah",
            BiruTua => "biru_tua",
        }
    }

    #[test]
    fn test_round_trip_through_str() {
        assert_eq!(Warna::BiruTua.to_string(), "biru_tua");
        assert_eq!("merah".parse::<Warna>(), Ok(Warna::Merah));
        assert!("hijau".parse::<Warna>().is_err());
        assert_eq!(Warna::ALL.len(), 2);
    }

    #[test]
    fn test_serde_uses_same_names() {
        let json = serde_json::to_string(&Warna::BiruTua).unwrap();
        assert_eq!(json, "\"biru_tua\"");
        let parsed: Warna = serde_json::from_str("\"merah\"").unwrap();
        assert_eq!(parsed, Warna::Merah);
        assert!(serde_json::from_str::<Warna>("\"MERAH\"").is_err());
    }
}
