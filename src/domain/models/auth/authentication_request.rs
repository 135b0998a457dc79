use crate::domain::entities::users::Role;

/// 접근에 필요한 역할: 나열된 역할 중 하나면 통과
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredRole {
    roles: Vec<Role>,
}

impl RequiredRole {
    pub fn any(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn is_satisfied(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
