use crate::domain::commands::payment::RecordPaymentCommand;
use crate::domain::models::payment::{
    PaymentMethod as DomainPaymentMethod, PaymentRecord as DomainPaymentRecord,
};
use shared::{
    PaymentMethod as SharedPaymentMethod, PaymentRecord as SharedPaymentRecord,
    RecordPaymentRequest,
};

pub struct PaymentMapper;

impl PaymentMapper {
    pub fn to_command(dto: RecordPaymentRequest) -> RecordPaymentCommand {
        RecordPaymentCommand {
            worker_id: dto.worker_id,
            worker_name: dto.worker_name,
            payment_date: dto.payment_date,
            amount_paid: dto.amount_paid,
            payment_method: dto.payment_method,
        }
    }

    pub fn to_dto(domain: DomainPaymentRecord) -> SharedPaymentRecord {
        SharedPaymentRecord {
            worker_id: domain.worker_id,
            worker_name: domain.worker_name,
            payment_date: domain.payment_date.format("%Y-%m-%d").to_string(),
            amount_paid: domain.amount_paid,
            payment_method: Self::method_to_dto(domain.payment_method),
        }
    }

    pub fn method_to_dto(domain_method: DomainPaymentMethod) -> SharedPaymentMethod {
        match domain_method {
            DomainPaymentMethod::Cash => SharedPaymentMethod::Cash,
            DomainPaymentMethod::BankTransfer => SharedPaymentMethod::BankTransfer,
            DomainPaymentMethod::MobileMoney => SharedPaymentMethod::MobileMoney,
        }
    }
}
