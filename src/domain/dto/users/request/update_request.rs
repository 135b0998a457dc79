use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::users::ProfileChanges;
use crate::utils::string_utils::not_blank;

/// 계정 정보 부분 수정 요청
///
/// 비밀번호, 역할, 활성 여부는 이 요청으로 바꿀 수 없습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 150, message = "이름은 1-150자 사이여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 150, message = "성은 1-150자 사이여야 합니다"))]
    #[validate(custom(function = "not_blank"))]
    pub last_name: Option<String>,

    pub birthday: Option<NaiveDate>,
}

impl From<UpdateAccountRequest> for ProfileChanges {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            email: req.email.map(|e| e.trim().to_string()),
            first_name: req.first_name.map(|n| n.trim().to_string()),
            last_name: req.last_name.map(|n| n.trim().to_string()),
            birthday: req.birthday,
        }
    }
}
