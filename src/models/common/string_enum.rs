//! 以字符串形式存储的枚举
//!
//! 数据库里状态、角色等字段都存为小写字符串，这个宏统一生成
//! serde 映射、`Display`、`FromStr` 和 `as_str`。

/// 定义字符串枚举
///
/// ```rust,ignore
/// crate::define_string_enum! {
///     #[ts(export, export_to = "user.ts")]
///     pub enum UserRole {
///         Student => "student",
///         Teacher => "teacher",
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            ts_rs::TS
        )]
        $(#[$meta])*
        $vis enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
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
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::define_string_enum! {
        enum Light {
            Red => "red",
            Green => "green",
        }
    }

    #[test]
    fn test_round_trip_text() {
        assert_eq!(Light::Red.to_string(), "red");
        assert_eq!("green".parse::<Light>(), Ok(Light::Green));
        assert!("blue".parse::<Light>().is_err());
        assert_eq!(Light::ALL.len(), 2);
    }

    #[test]
    fn test_serde_uses_text() {
        assert_eq!(serde_json::to_string(&Light::Green).unwrap(), "\"green\"");
        let parsed: Light = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(parsed, Light::Red);
    }
}
