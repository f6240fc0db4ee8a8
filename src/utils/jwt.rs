use crate::config::AppConfig;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // 只接受 "access"
    pub exp: usize,
    pub iat: usize,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Access Token（认证由外部系统负责，这里仅用于种子管理员与测试）
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let now = chrono::Utc::now();
        let expiration = now + chrono::Duration::minutes(config.jwt.access_token_expiry);

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: "access".to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(Self::get_secret().as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(Self::get_secret().as_ref());
        let claims = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)?;

        if claims.token_type != "access" {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }
}
