// Message table for every diagnostic the compiler can report.
//
// Codes are grouped by phase: 1000s tokenizer, 1100s parser,
// 2000s validator, 5000s I/O and configuration.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const UNEXPECTED_CHARACTER: u32 = 1001;
    pub const UNEXPECTED_TOKEN: u32 = 1101;
    pub const UNKNOWN_IDENTIFIER: u32 = 2001;
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: u32 = 2002;
    pub const CLASS_CANNOT_EXTEND_NON_CLASS: u32 = 2003;
    pub const CLASS_CANNOT_BE_EXTENDED: u32 = 2004;
    pub const CLASS_CANNOT_IMPLEMENT_NON_INTERFACE: u32 = 2005;
    pub const CLASS_MUST_IMPLEMENT_ABSTRACT_MEMBER: u32 = 2006;
    pub const CONSTRUCTOR_NAME_MISMATCH: u32 = 2007;
    pub const ABSTRACT_METHOD_OUTSIDE_ABSTRACT_CLASS: u32 = 2008;
    pub const INTERFACE_METHOD_CANNOT_BE_ABSTRACT: u32 = 2009;
    pub const ABSTRACT_METHOD_CANNOT_HAVE_IMPLEMENTATION: u32 = 2010;
    pub const METHOD_MUST_HAVE_IMPLEMENTATION: u32 = 2011;
    pub const CONSTRUCTOR_TOP_LEVEL_RETURN: u32 = 2012;
    pub const METHOD_MUST_RETURN_VALUE: u32 = 2013;
    pub const ABSTRACT_FIELD_OUTSIDE_ABSTRACT_CLASS: u32 = 2014;
    pub const ABSTRACT_FIELD_CANNOT_HAVE_VALUE: u32 = 2015;
    pub const UNEXPECTED_RETURN: u32 = 2016;
    pub const EXPECTED_RETURN_TYPE: u32 = 2017;
    pub const CONSTRUCTORS_CANNOT_RETURN_VALUES: u32 = 2018;
    pub const UNREACHABLE_CODE: u32 = 2019;
    pub const CANNOT_REASSIGN_FINAL_VALUE: u32 = 2020;
    pub const CANNOT_REASSIGN_FINAL_MEMBER: u32 = 2021;
    pub const INVALID_ASSIGNMENT: u32 = 2022;
    pub const INVALID_EXPRESSION: u32 = 2023;
    pub const INVALID_OPERATOR: u32 = 2024;
    pub const CANNOT_CAST: u32 = 2025;
    pub const INVALID_FUNCTION_ARGUMENTS: u32 = 2026;
    pub const NOT_A_FUNCTION: u32 = 2027;
    pub const INVALID_CONSTRUCTOR_ARGUMENTS: u32 = 2028;
    pub const NOT_CONSTRUCTABLE: u32 = 2029;
    pub const INSTANCE_METHOD_IN_STATIC_CONTEXT: u32 = 2030;
    pub const MEMBER_NOT_FOUND: u32 = 2031;
    pub const TYPE_HAS_NO_PROPERTIES: u32 = 2032;
    pub const INVALID_ARRAY_INDEX_TYPE: u32 = 2033;
    pub const INSTANCE_MEMBER_ON_STATIC_CLASS: u32 = 2034;
    pub const PRIVATE_MEMBER_ACCESS: u32 = 2035;
    pub const PROTECTED_MEMBER_ACCESS: u32 = 2036;
    pub const THIS_IN_STATIC_CONTEXT: u32 = 2037;
    pub const NO_SUPERTYPES: u32 = 2038;
    pub const INVALID_IMPORT_NAME: u32 = 2039;
    pub const MISSING_PACKAGE: u32 = 2040;
    pub const CANNOT_READ_FILE: u32 = 5001;
    pub const CANNOT_WRITE_FILE: u32 = 5002;
    pub const INVALID_CONFIG_FILE: u32 = 5003;
}

pub mod diagnostic_messages {
    pub const UNEXPECTED_CHARACTER: &str = "Unexpected character '{0}'.";
    pub const UNEXPECTED_TOKEN: &str = "{0}";
    pub const UNKNOWN_IDENTIFIER: &str = "Unknown identifier '{0}'";
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: &str = "'{0}' is not assignable to '{1}'";
    pub const CLASS_CANNOT_EXTEND_NON_CLASS: &str = "Class '{0}' cannot extend non-class '{1}'";
    pub const CLASS_CANNOT_BE_EXTENDED: &str = "Class '{0}' cannot be extended by '{1}'";
    pub const CLASS_CANNOT_IMPLEMENT_NON_INTERFACE: &str = "Class '{0}' cannot implement non-interface '{1}'";
    pub const CLASS_MUST_IMPLEMENT_ABSTRACT_MEMBER: &str = "Class '{0}' must implement abstract member '{1}'";
    pub const CONSTRUCTOR_NAME_MISMATCH: &str = "Constructor '{0}' must match the name of its class, '{1}'";
    pub const ABSTRACT_METHOD_OUTSIDE_ABSTRACT_CLASS: &str = "Abstract methods are only allowed in abstract classes";
    pub const INTERFACE_METHOD_CANNOT_BE_ABSTRACT: &str = "Interface method '{0}' cannot be abstract";
    pub const ABSTRACT_METHOD_CANNOT_HAVE_IMPLEMENTATION: &str = "Abstract method '{0}' cannot have an implementation";
    pub const METHOD_MUST_HAVE_IMPLEMENTATION: &str = "Non-abstract method '{0}' must have an implementation";
    pub const CONSTRUCTOR_TOP_LEVEL_RETURN: &str = "Return statements are not allowed in the top-level block of a constructor";
    pub const METHOD_MUST_RETURN_VALUE: &str = "Method '{0}' must return a value of type '{1}'";
    pub const ABSTRACT_FIELD_OUTSIDE_ABSTRACT_CLASS: &str = "Abstract fields are only allowed in abstract classes";
    pub const ABSTRACT_FIELD_CANNOT_HAVE_VALUE: &str = "Abstract fields cannot have values";
    pub const UNEXPECTED_RETURN: &str = "Unexpected return";
    pub const EXPECTED_RETURN_TYPE: &str = "Expected a return type of '{0}'";
    pub const CONSTRUCTORS_CANNOT_RETURN_VALUES: &str = "Constructors cannot return values";
    pub const UNREACHABLE_CODE: &str = "Unreachable code";
    pub const CANNOT_REASSIGN_FINAL_VALUE: &str = "Cannot reassign final value '{0}'";
    pub const CANNOT_REASSIGN_FINAL_MEMBER: &str = "Cannot reassign final member '{0}'";
    pub const INVALID_ASSIGNMENT: &str = "Invalid assignment";
    pub const INVALID_EXPRESSION: &str = "Invalid expression";
    pub const INVALID_OPERATOR: &str = "Invalid operator '{0}' for '{1}'";
    pub const CANNOT_CAST: &str = "Cannot cast '{0}' to '{1}'";
    pub const INVALID_FUNCTION_ARGUMENTS: &str = "Invalid arguments for function '{0}': {1}";
    pub const NOT_A_FUNCTION: &str = "'{0}' is not a function";
    pub const INVALID_CONSTRUCTOR_ARGUMENTS: &str = "Invalid constructor arguments {0}";
    pub const NOT_CONSTRUCTABLE: &str = "'{0}' is not constructable";
    pub const INSTANCE_METHOD_IN_STATIC_CONTEXT: &str = "Instance methods cannot be called in static methods or initializers";
    pub const MEMBER_NOT_FOUND: &str = "Member '{0}' not found on '{1}'";
    pub const TYPE_HAS_NO_PROPERTIES: &str = "'{0}' does not have any properties";
    pub const INVALID_ARRAY_INDEX_TYPE: &str = "Invalid array index type '{0}'";
    pub const INSTANCE_MEMBER_ON_STATIC_CLASS: &str = "Instance member '{0}' cannot be accessed on static class '{1}'";
    pub const PRIVATE_MEMBER_ACCESS: &str = "Private member '{0}' is only accessible inside '{1}'";
    pub const PROTECTED_MEMBER_ACCESS: &str = "Protected member '{0}' is only accessible inside '{1}' and its subclasses";
    pub const THIS_IN_STATIC_CONTEXT: &str = "'this' is not allowed in static methods or initializers";
    pub const NO_SUPERTYPES: &str = "'{0}' doesn't have any supertypes";
    pub const INVALID_IMPORT_NAME: &str = "Invalid import name: '{0}'";
    pub const MISSING_PACKAGE: &str = "Java files must contain a package";
    pub const CANNOT_READ_FILE: &str = "Cannot read file '{0}': {1}";
    pub const CANNOT_WRITE_FILE: &str = "Cannot write file '{0}': {1}";
    pub const INVALID_CONFIG_FILE: &str = "Invalid configuration file '{0}': {1}";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_CHARACTER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNEXPECTED_CHARACTER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNEXPECTED_TOKEN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_IDENTIFIER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNKNOWN_IDENTIFIER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CLASS_CANNOT_EXTEND_NON_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CLASS_CANNOT_EXTEND_NON_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CLASS_CANNOT_BE_EXTENDED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CLASS_CANNOT_BE_EXTENDED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CLASS_CANNOT_IMPLEMENT_NON_INTERFACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CLASS_CANNOT_IMPLEMENT_NON_INTERFACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CLASS_MUST_IMPLEMENT_ABSTRACT_MEMBER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CLASS_MUST_IMPLEMENT_ABSTRACT_MEMBER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTOR_NAME_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRUCTOR_NAME_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ABSTRACT_METHOD_OUTSIDE_ABSTRACT_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ABSTRACT_METHOD_OUTSIDE_ABSTRACT_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INTERFACE_METHOD_CANNOT_BE_ABSTRACT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INTERFACE_METHOD_CANNOT_BE_ABSTRACT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ABSTRACT_METHOD_CANNOT_HAVE_IMPLEMENTATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ABSTRACT_METHOD_CANNOT_HAVE_IMPLEMENTATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::METHOD_MUST_HAVE_IMPLEMENTATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::METHOD_MUST_HAVE_IMPLEMENTATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTOR_TOP_LEVEL_RETURN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRUCTOR_TOP_LEVEL_RETURN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::METHOD_MUST_RETURN_VALUE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::METHOD_MUST_RETURN_VALUE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ABSTRACT_FIELD_OUTSIDE_ABSTRACT_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ABSTRACT_FIELD_OUTSIDE_ABSTRACT_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ABSTRACT_FIELD_CANNOT_HAVE_VALUE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ABSTRACT_FIELD_CANNOT_HAVE_VALUE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_RETURN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNEXPECTED_RETURN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_RETURN_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_RETURN_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONSTRUCTORS_CANNOT_RETURN_VALUES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONSTRUCTORS_CANNOT_RETURN_VALUES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNREACHABLE_CODE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNREACHABLE_CODE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_REASSIGN_FINAL_VALUE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_REASSIGN_FINAL_VALUE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_REASSIGN_FINAL_MEMBER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_REASSIGN_FINAL_MEMBER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_ASSIGNMENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_ASSIGNMENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_EXPRESSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_EXPRESSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_OPERATOR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_OPERATOR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_CAST,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_CAST,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_FUNCTION_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_FUNCTION_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NOT_A_FUNCTION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NOT_A_FUNCTION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CONSTRUCTOR_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CONSTRUCTOR_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NOT_CONSTRUCTABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NOT_CONSTRUCTABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INSTANCE_METHOD_IN_STATIC_CONTEXT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INSTANCE_METHOD_IN_STATIC_CONTEXT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MEMBER_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MEMBER_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_HAS_NO_PROPERTIES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_HAS_NO_PROPERTIES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_ARRAY_INDEX_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_ARRAY_INDEX_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INSTANCE_MEMBER_ON_STATIC_CLASS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INSTANCE_MEMBER_ON_STATIC_CLASS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PRIVATE_MEMBER_ACCESS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PRIVATE_MEMBER_ACCESS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROTECTED_MEMBER_ACCESS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROTECTED_MEMBER_ACCESS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THIS_IN_STATIC_CONTEXT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THIS_IN_STATIC_CONTEXT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_SUPERTYPES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_SUPERTYPES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_IMPORT_NAME,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_IMPORT_NAME,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISSING_PACKAGE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::MISSING_PACKAGE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_READ_FILE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_READ_FILE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_WRITE_FILE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_WRITE_FILE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CONFIG_FILE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CONFIG_FILE,
    },
];
