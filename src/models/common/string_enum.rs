//! 字符串枚举生成宏
//!
//! 数据库中以字符串保存的枚举（核心领域、班组等级等）都通过此宏生成，
//! 自动实现 `as_str` / `display_name` / `Display` / `FromStr` / 反序列化。

/// 定义以字符串存储的枚举
///
/// ```rust,ignore
/// define_string_enum! {
///     #[derive(TS)]
///     pub enum GroupLevel {
///         Kinder => ("kinder", "Kinder"),
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($value:literal, $display:literal)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// 存储与传输使用的字符串值
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }

            /// 面向用户的显示名称
            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $display,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
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

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::define_string_enum! {
        pub enum Fruit {
            Apple => ("apple", "Manzana"),
            Pear => ("pear", "Pera"),
        }
    }

    #[test]
    fn test_round_trip_and_labels() {
        assert_eq!("pear".parse::<Fruit>(), Ok(Fruit::Pear));
        assert_eq!(Fruit::Apple.to_string(), "apple");
        assert_eq!(Fruit::Apple.display_name(), "Manzana");
        assert_eq!(Fruit::ALL.len(), 2);
        assert!("banana".parse::<Fruit>().is_err());
    }

    #[test]
    fn test_serde_uses_storage_value() {
        let json = serde_json::to_string(&Fruit::Pear).unwrap();
        assert_eq!(json, "\"pear\"");
        let parsed: Fruit = serde_json::from_str("\"apple\"").unwrap();
        assert_eq!(parsed, Fruit::Apple);
    }
}
