//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the struct, the `Entity`/`Data` trait
//! implementations and the validation rules for each record type.

/// Complete macro to create a Data entity with automatic trait implementations
///
/// The generated struct carries `id`, `created_at` and `updated_at` in
/// addition to the listed fields. Field attributes (docs, serde) are kept.
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk::prelude::*;
///
/// impl_data_entity!(
///     Item,
///     "item",
///     "items",
///     ["name", "description"],
///     {
///         name: String,
///         description: String,
///         category: Option<String>,
///         price: Decimal,
///     }
/// );
///
/// let item = Item::new("Olive oil".into(), String::new(), None, Decimal::new(850, 2));
/// ```
#[macro_export]
macro_rules! impl_data_entity {
    (
        $type:ident,
        $type_name:expr,
        $plural:expr,
        [ $( $indexed_field:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,

            /// When this entity was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,
            $( $(#[$field_meta])* pub $specific_field : $specific_type ),*
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $type_name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }
        }

        impl $crate::core::entity::Data for $type {
            fn indexed_fields() -> &'static [&'static str] {
                &[ $( $indexed_field ),* ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                #[allow(unused_imports)]
                use $crate::core::field::ToFieldValue;
                match field {
                    "id" => Some($crate::core::field::FieldValue::Uuid(self.id)),
                    "created_at" => Some($crate::core::field::FieldValue::DateTime(self.created_at)),
                    "updated_at" => Some($crate::core::field::FieldValue::DateTime(self.updated_at)),
                    _ => {
                        $(
                            if field == stringify!($specific_field) {
                                return Some(self.$specific_field.to_field_value());
                            }
                        )*
                        None
                    }
                }
            }
        }

        impl $type {
            /// Create a new instance of this entity
            #[allow(clippy::too_many_arguments)]
            pub fn new( $( $specific_field: $specific_type ),* ) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    created_at: now,
                    updated_at: now,
                    $( $specific_field ),*
                }
            }

            /// Update the updated_at timestamp to now
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

/// Extended macro to create a Data entity with validation and filtering
///
/// This macro extends `impl_data_entity!` with declarative validation and
/// filtering rules, selected per operation by the `Validated<T>` extractor.
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk::prelude::*;
///
/// impl_data_entity_validated!(
///     Payment,
///     "payment",
///     "payments",
///     [],
///     {
///         order: Uuid,
///         amount: Decimal,
///         date: NaiveDate,
///     },
///     validate: {
///         create: {
///             order: [required uuid],
///             amount: [required decimal positive],
///         },
///         update: {
///             amount: [optional decimal positive],
///         },
///     },
///     filters: {
///         create: {
///             amount: [round_decimals(2)],
///         },
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_data_entity_validated {
    (
        $type:ident,
        $type_name:expr,
        $plural:expr,
        [ $( $indexed_field:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $specific_field:ident : $specific_type:ty ),* $(,)?
        }
        $(,)?
        validate: {
            $(
                $op:ident: {
                    $(
                        $val_field:ident: [ $( $validator:tt )* ]
                    ),* $(,)?
                }
            ),* $(,)?
        }
        $(,)?
        filters: {
            $(
                $fop:ident: {
                    $(
                        $fil_field:ident: [ $( $filter:tt )* ]
                    ),* $(,)?
                }
            ),* $(,)?
        }
        $(,)?
    ) => {
        $crate::impl_data_entity!(
            $type,
            $type_name,
            $plural,
            [ $( $indexed_field ),* ],
            {
                $( $(#[$field_meta])* $specific_field : $specific_type ),*
            }
        );

        impl $crate::core::validation::ValidatableEntity for $type {
            fn validation_config(operation: &str) -> $crate::core::validation::EntityValidationConfig {
                let mut config = $crate::core::validation::EntityValidationConfig::new($type_name);

                $(
                    if operation == stringify!($op) {
                        $(
                            $crate::add_validators_for_field!(config, stringify!($val_field), $( $validator )*);
                        )*
                    }
                )*

                $(
                    if operation == stringify!($fop) {
                        $(
                            $crate::add_filters_for_field!(config, stringify!($fil_field), $( $filter )*);
                        )*
                    }
                )*

                config
            }
        }
    };
}

/// Helper macro to add validators to a field
#[macro_export]
macro_rules! add_validators_for_field {
    ($config:expr, $field:expr,) => {};

    ($config:expr, $field:expr, required $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::required());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, optional $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::optional());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, positive $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::positive());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, non_negative $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::non_negative());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, email $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::email());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, uuid $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::uuid());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, decimal $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::decimal());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, string_length($min:expr, $max:expr) $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::string_length($min, $max));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, max_value($max:expr) $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::max_value($max));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, in_list($( $value:expr ),* $(,)?) $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::in_list(vec![$( $value.to_string() ),*]));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, date_format($format:expr) $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::date_format($format));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };
}

/// Helper macro to add filters to a field
#[macro_export]
macro_rules! add_filters_for_field {
    ($config:expr, $field:expr,) => {};

    ($config:expr, $field:expr, trim $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::trim());
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, uppercase $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::uppercase());
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, lowercase $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::lowercase());
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };

    ($config:expr, $field:expr, round_decimals($decimals:expr) $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::round_decimals($decimals));
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };
}
