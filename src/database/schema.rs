// Closed enumerations mirrored from the database schema.
// Each maps onto a Postgres enum type created by the migrations.

pub mod types {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use utoipa::ToSchema;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "user_role", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum UserRole {
        Guest,
        Buyer,
        Designer,
        Admin,
    }

    /// Order lifecycle states. The set is closed: any other string is
    /// rejected at the boundary. Transitions are deliberately ungated --
    /// any status may be set to any other -- but two of them carry escrow
    /// side effects (capture on `AwaitingAdminConfirm`, refund on
    /// `Cancelled`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "order_status", rename_all = "snake_case")]
    #[serde(rename_all = "snake_case")]
    pub enum OrderStatus {
        New,
        InWork,
        OnReview,
        Revision,
        AwaitingAdminConfirm,
        Completed,
        Cancelled,
        Disputed,
    }

    impl OrderStatus {
        /// Statuses counted as "active" on the admin dashboard.
        pub const ACTIVE: [OrderStatus; 4] = [
            OrderStatus::InWork,
            OrderStatus::OnReview,
            OrderStatus::Revision,
            OrderStatus::AwaitingAdminConfirm,
        ];

        pub fn as_str(&self) -> &'static str {
            match self {
                OrderStatus::New => "new",
                OrderStatus::InWork => "in_work",
                OrderStatus::OnReview => "on_review",
                OrderStatus::Revision => "revision",
                OrderStatus::AwaitingAdminConfirm => "awaiting_admin_confirm",
                OrderStatus::Completed => "completed",
                OrderStatus::Cancelled => "cancelled",
                OrderStatus::Disputed => "disputed",
            }
        }
    }

    impl fmt::Display for OrderStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl std::str::FromStr for OrderStatus {
        type Err = UnknownVariant;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "new" => Ok(OrderStatus::New),
                "in_work" => Ok(OrderStatus::InWork),
                "on_review" => Ok(OrderStatus::OnReview),
                "revision" => Ok(OrderStatus::Revision),
                "awaiting_admin_confirm" => Ok(OrderStatus::AwaitingAdminConfirm),
                "completed" => Ok(OrderStatus::Completed),
                "cancelled" => Ok(OrderStatus::Cancelled),
                "disputed" => Ok(OrderStatus::Disputed),
                other => Err(UnknownVariant(other.to_string())),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "payment_status", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum PaymentStatus {
        Hold,
        Captured,
        Refunded,
    }

    impl fmt::Display for PaymentStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                PaymentStatus::Hold => write!(f, "hold"),
                PaymentStatus::Captured => write!(f, "captured"),
                PaymentStatus::Refunded => write!(f, "refunded"),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "sender_role", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum SenderRole {
        Buyer,
        Designer,
        Admin,
    }

    impl fmt::Display for SenderRole {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                SenderRole::Buyer => write!(f, "buyer"),
                SenderRole::Designer => write!(f, "designer"),
                SenderRole::Admin => write!(f, "admin"),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "application_status", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum ApplicationStatus {
        Pending,
        Approved,
        Rejected,
    }

    impl std::str::FromStr for ApplicationStatus {
        type Err = UnknownVariant;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "pending" => Ok(ApplicationStatus::Pending),
                "approved" => Ok(ApplicationStatus::Approved),
                "rejected" => Ok(ApplicationStatus::Rejected),
                other => Err(UnknownVariant(other.to_string())),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
    #[sqlx(type_name = "payout_status", rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum PayoutStatus {
        Requested,
        Approved,
        Paid,
        Rejected,
    }

    /// A string fell outside one of the closed enumerations.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UnknownVariant(pub String);

    impl fmt::Display for UnknownVariant {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "unknown variant: {}", self.0)
        }
    }

    impl std::error::Error for UnknownVariant {}

}
