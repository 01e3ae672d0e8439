//! UseCase: ログイン
//!
//! 管理者のニックネームでログインする場合は管理者パスワードを、
//! それ以外の参加者は共通のログインパスワードを要求します。

use super::LoginError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

#[derive(Debug, Clone, Default)]
pub struct LoginUseCase {
    admin_nickname: Option<String>,
    admin_password: Option<String>,
    login_password: Option<String>,
}

impl LoginUseCase {
    pub fn new(
        admin_nickname: Option<String>,
        admin_password: Option<String>,
        login_password: Option<String>,
    ) -> Self {
        Self {
            admin_nickname,
            admin_password,
            login_password,
        }
    }

    pub fn execute(&self, nickname: &str, password: &str) -> Result<Role, LoginError> {
        if self.admin_nickname.as_deref() == Some(nickname) {
            let expected = self
                .admin_password
                .as_deref()
                .ok_or(LoginError::NotConfigured)?;
            return if password == expected {
                Ok(Role::Admin)
            } else {
                Err(LoginError::InvalidPassword)
            };
        }

        let expected = self
            .login_password
            .as_deref()
            .ok_or(LoginError::NotConfigured)?;
        if password == expected {
            Ok(Role::Member)
        } else {
            Err(LoginError::InvalidPassword)
        }
    }
}
