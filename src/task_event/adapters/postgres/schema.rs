//! Diesel schema for outbound task events.

diesel::table! {
    /// Outbound task events awaiting dispatch.
    ///
    /// Columns after `sequence_number` mirror the `dt.TaskEvents` table type
    /// in wire order.
    task_events (sequence_number) {
        /// Surrogate key assigned by the database.
        sequence_number -> Int8,
        /// Owning orchestration instance.
        #[max_length = 100]
        instance_id -> Varchar,
        /// Owning execution.
        #[max_length = 50]
        execution_id -> Nullable<Varchar>,
        /// Activity, orchestration, or event name.
        #[max_length = 300]
        name -> Nullable<Varchar>,
        /// Event type tag.
        #[max_length = 40]
        event_type -> Varchar,
        /// Task identifier.
        task_id -> Nullable<Int4>,
        /// Delayed delivery time.
        visible_time -> Nullable<Timestamptz>,
        /// Lock owner set by the work dispatcher.
        #[max_length = 100]
        locked_by -> Nullable<Varchar>,
        /// Lock expiry set by the work dispatcher.
        lock_expiration -> Nullable<Timestamptz>,
        /// Reason text.
        reason -> Nullable<Text>,
        /// Payload text.
        payload_text -> Nullable<Text>,
        /// Payload identity.
        payload_id -> Nullable<Uuid>,
        /// Schema or version tag.
        #[max_length = 100]
        version -> Nullable<Varchar>,
    }
}
