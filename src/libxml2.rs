//! LibXML2 FFI Wrapper Module
//!
//! Safe wrappers around the parts of libxml2 needed to read a review document:
//! parsing XML from memory, validating a parsed document against an XSD held in
//! memory, and walking element children to read names and text.
//!
//! Ownership rules:
//! - Every libxml2 allocation is owned by exactly one Rust value and released
//!   in its `Drop` impl (`XmlSchemaPtr`, `XmlDocument`, `NodeText`'s buffer).
//! - `XmlElement` borrows its document, so element handles cannot outlive the
//!   tree they point into.
//! - Documents are parsed with network access disabled and without printing
//!   diagnostics; parse errors are read back through `xmlGetLastError`.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::sync::{Arc, Once};

use libc::{c_char, c_int, c_uchar, c_void};

use crate::error::{LibXml2Error, LibXml2Result};

/// Global initialization flag for libxml2
///
/// `xmlInitParser` is not thread-safe, so it runs exactly once.
static LIBXML2_INIT: Once = Once::new();

const XML_PARSE_NOERROR: c_int = 1 << 5;
const XML_PARSE_NOWARNING: c_int = 1 << 6;
const XML_PARSE_NONET: c_int = 1 << 11;

const XML_ELEMENT_NODE: c_int = 1;

// Opaque libxml2 structures
#[repr(C)]
pub struct XmlSchema {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaParserCtxt {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaValidCtxt {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlDoc {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlDtd {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlBuffer {
    _private: [u8; 0],
}

/// Leading fields of `struct _xmlNode`.
///
/// Only ever read through pointers returned by libxml2; never constructed or
/// sized on the Rust side.
#[repr(C)]
pub struct XmlNode {
    _private: *mut c_void,
    node_type: c_int,
    name: *const c_uchar,
}

#[allow(non_camel_case_types)]
#[repr(C)]
pub struct xmlError {
    pub domain: c_int,
    pub code: c_int,
    pub message: *const c_char,
    pub level: c_int,
    pub file: *const c_char,
    pub line: c_int,
    pub str1: *const c_char,
    pub str2: *const c_char,
    pub str3: *const c_char,
    pub int1: c_int,
    pub int2: c_int,
    pub ctxt: *mut c_void,
    pub node: *mut c_void,
}

pub type XmlStructuredErrorFunc =
    Option<unsafe extern "C" fn(user_data: *mut c_void, error: *mut xmlError)>;

// External libxml2 FFI declarations
#[cfg_attr(target_os = "windows", link(name = "libxml2"))]
#[cfg_attr(not(target_os = "windows"), link(name = "xml2"))]
unsafe extern "C" {
    pub fn xmlInitParser();

    // Document parsing and traversal
    pub fn xmlReadMemory(
        buffer: *const c_char,
        size: c_int,
        url: *const c_char,
        encoding: *const c_char,
        options: c_int,
    ) -> *mut XmlDoc;
    pub fn xmlFreeDoc(doc: *mut XmlDoc);
    pub fn xmlDocGetRootElement(doc: *const XmlDoc) -> *mut XmlNode;
    pub fn xmlGetIntSubset(doc: *const XmlDoc) -> *mut XmlDtd;
    pub fn xmlFirstElementChild(parent: *mut XmlNode) -> *mut XmlNode;
    pub fn xmlNextElementSibling(node: *mut XmlNode) -> *mut XmlNode;

    // Text content
    pub fn xmlBufferCreate() -> *mut XmlBuffer;
    pub fn xmlBufferFree(buf: *mut XmlBuffer);
    pub fn xmlBufferContent(buf: *const XmlBuffer) -> *const c_uchar;
    pub fn xmlBufferLength(buf: *const XmlBuffer) -> c_int;
    pub fn xmlNodeBufGetContent(buffer: *mut XmlBuffer, cur: *const XmlNode) -> c_int;

    // Error state
    pub fn xmlGetLastError() -> *const xmlError;
    pub fn xmlResetLastError();

    // Schema parsing functions
    pub fn xmlSchemaNewMemParserCtxt(
        buffer: *const c_char,
        size: c_int,
    ) -> *mut XmlSchemaParserCtxt;
    pub fn xmlSchemaParse(ctxt: *const XmlSchemaParserCtxt) -> *mut XmlSchema;
    pub fn xmlSchemaFreeParserCtxt(ctxt: *mut XmlSchemaParserCtxt);
    pub fn xmlSchemaFree(schema: *mut XmlSchema);

    // Schema validation functions
    pub fn xmlSchemaNewValidCtxt(schema: *const XmlSchema) -> *mut XmlSchemaValidCtxt;
    pub fn xmlSchemaFreeValidCtxt(ctxt: *mut XmlSchemaValidCtxt);
    pub fn xmlSchemaValidateDoc(ctxt: *mut XmlSchemaValidCtxt, doc: *mut XmlDoc) -> c_int;
    pub fn xmlSchemaSetValidStructuredErrors(
        ctxt: *mut XmlSchemaValidCtxt,
        sherr: XmlStructuredErrorFunc,
        ctx: *mut c_void,
    );
}

/// Callback for libxml2 to report validation errors (structured)
unsafe extern "C" fn structured_error_callback(user_data: *mut c_void, error: *mut xmlError) {
    let errors = unsafe { &mut *(user_data as *mut Vec<String>) };

    if !error.is_null()
        && let Some(message) = unsafe { error_message(&*error) }
    {
        errors.push(message);
    }
}

/// Render an `xmlError` as `line N: message`, or just the message when no
/// line is known.
unsafe fn error_message(error: &xmlError) -> Option<String> {
    if error.message.is_null() {
        return None;
    }
    let message = unsafe { CStr::from_ptr(error.message) }
        .to_string_lossy()
        .trim()
        .to_string();
    if error.line > 0 {
        Some(format!("line {}: {}", error.line, message))
    } else {
        Some(message)
    }
}

fn buffer_len(data: &[u8]) -> LibXml2Result<c_int> {
    c_int::try_from(data.len()).map_err(|_| LibXml2Error::InputTooLarge { size: data.len() })
}

/// Thread-safe wrapper for a parsed libxml2 schema, freed on drop
#[derive(Debug, Clone)]
pub struct XmlSchemaPtr {
    inner: Arc<XmlSchemaInner>,
}

#[derive(Debug)]
struct XmlSchemaInner {
    ptr: *mut XmlSchema,
    _phantom: PhantomData<XmlSchema>,
}

// Safety: libxml2 schema structures are read-only after parsing
unsafe impl Send for XmlSchemaInner {}
unsafe impl Sync for XmlSchemaInner {}

impl XmlSchemaPtr {
    /// # Safety
    ///
    /// `ptr` must come from `xmlSchemaParse` and must not be freed elsewhere.
    unsafe fn from_raw(ptr: *mut XmlSchema) -> LibXml2Result<Self> {
        if ptr.is_null() {
            return Err(LibXml2Error::SchemaParseFailed);
        }

        Ok(XmlSchemaPtr {
            inner: Arc::new(XmlSchemaInner {
                ptr,
                _phantom: PhantomData,
            }),
        })
    }

    fn as_ptr(&self) -> *const XmlSchema {
        self.inner.ptr
    }
}

impl Drop for XmlSchemaInner {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                xmlSchemaFree(self.ptr);
            }
            self.ptr = std::ptr::null_mut();
        }
    }
}

/// A parsed XML document, freed on drop
#[derive(Debug)]
pub struct XmlDocument {
    ptr: *mut XmlDoc,
}

impl XmlDocument {
    /// The document element, if the document has one
    pub fn root(&self) -> Option<XmlElement<'_>> {
        let node = unsafe { xmlDocGetRootElement(self.ptr) };
        XmlElement::from_raw(node)
    }

    /// Whether the document carries a `<!DOCTYPE ...>` declaration
    ///
    /// Entity references declared there are left unexpanded by the parser.
    pub fn has_doctype(&self) -> bool {
        !unsafe { xmlGetIntSubset(self.ptr) }.is_null()
    }
}

impl Drop for XmlDocument {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                xmlFreeDoc(self.ptr);
            }
            self.ptr = std::ptr::null_mut();
        }
    }
}

/// Borrowed handle to an element node inside an [`XmlDocument`]
#[derive(Debug, Clone, Copy)]
pub struct XmlElement<'doc> {
    ptr: *mut XmlNode,
    _doc: PhantomData<&'doc XmlDocument>,
}

impl<'doc> XmlElement<'doc> {
    fn from_raw(ptr: *mut XmlNode) -> Option<Self> {
        if ptr.is_null() || unsafe { (*ptr).node_type } != XML_ELEMENT_NODE {
            return None;
        }
        Some(Self {
            ptr,
            _doc: PhantomData,
        })
    }

    /// Local name of the element
    pub fn name(&self) -> String {
        let name = unsafe { (*self.ptr).name };
        if name.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(name as *const c_char) }
            .to_string_lossy()
            .into_owned()
    }

    /// Element children in document order; text, comments and processing
    /// instructions are skipped
    pub fn children(&self) -> ElementChildren<'doc> {
        ElementChildren {
            next: unsafe { xmlFirstElementChild(self.ptr) },
            _doc: PhantomData,
        }
    }

    /// First element child called `name`
    pub fn child(&self, name: &str) -> Option<XmlElement<'doc>> {
        self.children().find(|child| child.name() == name)
    }

    /// Concatenated text of the element and all its descendants, with
    /// entities and character references resolved
    pub fn text(&self) -> LibXml2Result<String> {
        let buffer = NodeText::new()?;
        let status = unsafe { xmlNodeBufGetContent(buffer.ptr, self.ptr) };
        if status != 0 {
            return Err(LibXml2Error::MemoryAllocation);
        }
        Ok(buffer.to_string_lossy())
    }
}

/// Iterator over the element children of an [`XmlElement`]
pub struct ElementChildren<'doc> {
    next: *mut XmlNode,
    _doc: PhantomData<&'doc XmlDocument>,
}

impl<'doc> Iterator for ElementChildren<'doc> {
    type Item = XmlElement<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = XmlElement::from_raw(self.next)?;
        self.next = unsafe { xmlNextElementSibling(current.ptr) };
        Some(current)
    }
}

/// Scratch `xmlBuffer` used to read node text
struct NodeText {
    ptr: *mut XmlBuffer,
}

impl NodeText {
    fn new() -> LibXml2Result<Self> {
        let ptr = unsafe { xmlBufferCreate() };
        if ptr.is_null() {
            return Err(LibXml2Error::MemoryAllocation);
        }
        Ok(Self { ptr })
    }

    fn to_string_lossy(&self) -> String {
        unsafe {
            let content = xmlBufferContent(self.ptr);
            let len = xmlBufferLength(self.ptr);
            if content.is_null() || len <= 0 {
                return String::new();
            }
            let bytes = std::slice::from_raw_parts(content, len as usize);
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

impl Drop for NodeText {
    fn drop(&mut self) {
        unsafe {
            xmlBufferFree(self.ptr);
        }
    }
}

/// Validation result from libxml2
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Validation succeeded (return code 0)
    Valid,
    /// Validation failed with errors (return code > 0)
    Invalid {
        error_count: i32,
        errors: Vec<String>,
    },
    /// Internal error occurred (return code < 0)
    InternalError { code: i32 },
}

impl ValidationResult {
    /// Create ValidationResult from libxml2 return code and captured errors
    pub fn from_code(code: c_int, errors: Vec<String>) -> Self {
        match code {
            0 => ValidationResult::Valid,
            n if n > 0 => ValidationResult::Invalid {
                error_count: n,
                errors,
            },
            n => ValidationResult::InternalError { code: n },
        }
    }
}

/// Entry point for all libxml2 operations
///
/// Creating a wrapper initializes the library once per process.
pub struct LibXml2Wrapper {
    _phantom: PhantomData<()>,
}

impl LibXml2Wrapper {
    pub fn new() -> Self {
        LIBXML2_INIT.call_once(|| unsafe {
            xmlInitParser();
        });

        LibXml2Wrapper {
            _phantom: PhantomData,
        }
    }

    /// Parse an XML schema from a memory buffer
    ///
    /// # Errors
    ///
    /// Returns `LibXml2Error::SchemaParseFailed` if the schema cannot be parsed.
    /// Returns `LibXml2Error::MemoryAllocation` if the parser context cannot be created.
    pub fn parse_schema_from_memory(&self, schema_data: &[u8]) -> LibXml2Result<XmlSchemaPtr> {
        let size = buffer_len(schema_data)?;
        unsafe {
            let parser_ctxt =
                xmlSchemaNewMemParserCtxt(schema_data.as_ptr() as *const c_char, size);
            if parser_ctxt.is_null() {
                return Err(LibXml2Error::MemoryAllocation);
            }

            let schema_ptr = xmlSchemaParse(parser_ctxt);
            xmlSchemaFreeParserCtxt(parser_ctxt);

            XmlSchemaPtr::from_raw(schema_ptr)
        }
    }

    /// Parse an XML document from memory
    ///
    /// # Errors
    ///
    /// Returns `LibXml2Error::DocumentParseFailed` with libxml2's diagnostic if
    /// the content is not well-formed XML.
    pub fn parse_document_from_memory(&self, xml: &[u8]) -> LibXml2Result<XmlDocument> {
        let size = buffer_len(xml)?;
        unsafe {
            xmlResetLastError();
            let doc = xmlReadMemory(
                xml.as_ptr() as *const c_char,
                size,
                std::ptr::null(),
                std::ptr::null(),
                XML_PARSE_NONET | XML_PARSE_NOERROR | XML_PARSE_NOWARNING,
            );

            if doc.is_null() {
                let last = xmlGetLastError();
                let details = if last.is_null() {
                    None
                } else {
                    error_message(&*last)
                };
                xmlResetLastError();
                return Err(LibXml2Error::DocumentParseFailed {
                    details: details.unwrap_or_else(|| "document is not well-formed".to_string()),
                });
            }

            Ok(XmlDocument { ptr: doc })
        }
    }

    /// Validate a parsed document against a schema, collecting every
    /// validation message
    ///
    /// # Errors
    ///
    /// Returns `LibXml2Error::ValidationContextCreationFailed` if the validation
    /// context cannot be created, and `LibXml2Error::ValidationFailed` when
    /// libxml2 reports an internal error.
    pub fn validate_document(
        &self,
        schema: &XmlSchemaPtr,
        document: &XmlDocument,
    ) -> LibXml2Result<ValidationResult> {
        unsafe {
            let valid_ctxt = xmlSchemaNewValidCtxt(schema.as_ptr());
            if valid_ctxt.is_null() {
                return Err(LibXml2Error::ValidationContextCreationFailed);
            }

            let mut errors = Vec::new();
            let errors_ptr = &mut errors as *mut Vec<String> as *mut c_void;
            xmlSchemaSetValidStructuredErrors(
                valid_ctxt,
                Some(structured_error_callback),
                errors_ptr,
            );

            let result_code = xmlSchemaValidateDoc(valid_ctxt, document.ptr);
            xmlSchemaFreeValidCtxt(valid_ctxt);

            match ValidationResult::from_code(result_code, errors) {
                ValidationResult::InternalError { code } => {
                    Err(LibXml2Error::ValidationFailed { code })
                }
                result => Ok(result),
            }
        }
    }
}

impl Default for LibXml2Wrapper {
    fn default() -> Self {
        Self::new()
    }
}
