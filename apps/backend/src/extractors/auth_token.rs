use actix_web::{http::header, HttpRequest};

use crate::AppError;

/// Parse `Authorization: Bearer <token>`. The scheme is case-insensitive.
pub fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let auth_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = auth_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(token.to_string())
        }
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;
    use crate::errors::ErrorCode;

    fn parse(value: Option<&str>) -> Result<String, AppError> {
        let mut req = TestRequest::default();
        if let Some(v) = value {
            req = req.insert_header((header::AUTHORIZATION, v));
        }
        bearer_token(&req.to_http_request())
    }

    #[test]
    fn accepts_bearer_in_any_case() {
        assert_eq!(parse(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(parse(Some("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn rejects_missing_or_malformed() {
        for value in [None, Some("Basic abc"), Some("Bearer"), Some("Bearer a b"), Some("")] {
            let err = parse(value).unwrap_err();
            assert_eq!(err.code(), ErrorCode::UnauthorizedMissingBearer);
        }
    }
}
